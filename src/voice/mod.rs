#[cfg(feature = "desktop")]
pub mod commands;
pub mod controller;
pub mod state;
pub mod upload;

pub use controller::VoiceAnalysisController;
pub use state::{VoicePanelSnapshot, VoicePhase};
pub use upload::{validate_upload, UploadError, UploadedFile, ACCEPT_FILTER};
