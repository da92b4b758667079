use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `accept` filter for the frontend file picker.
pub const ACCEPT_FILTER: &str = "audio/*,.wav";

/// File metadata as reported by the picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.map(str::to_string),
            size_bytes: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please select a valid audio file (.wav, .mp3, etc.)")]
    NotAudio { name: String },
}

/// Accepts a file whose declared type mentions audio or whose name ends in
/// `.wav`.
pub fn validate_upload(file: &UploadedFile) -> Result<(), UploadError> {
    let audio_type = file
        .mime_type
        .as_deref()
        .map(|mime| mime.contains("audio"))
        .unwrap_or(false);
    let wav_name = file.name.ends_with(".wav");

    if audio_type || wav_name {
        Ok(())
    } else {
        Err(UploadError::NotAudio {
            name: file.name.clone(),
        })
    }
}
