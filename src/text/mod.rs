#[cfg(feature = "desktop")]
pub mod commands;
pub mod controller;
pub mod state;

pub use controller::{TextAnalysisController, SAMPLE_TEXTS};
pub use state::{LivePreview, TextPanelSnapshot, TextPanelState};
