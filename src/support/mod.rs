pub mod breathing;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod contacts;

pub use breathing::{BreathingExercise, BreathingPhase, BreathingState};
pub use contacts::{
    contact_href, emergency_contacts, is_contact_href, self_care_activities, EmergencyContact,
    SelfCareActivity,
};
