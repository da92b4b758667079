//! Emotion scoring capability. Controllers only see [`EmotionScorer`]; the
//! keyword scorer is a stand-in until a real model is plugged in.

pub mod config;
pub mod keyword;

use serde::{Deserialize, Serialize};

use crate::models::{TextAnalysis, VoiceAnalysis};

pub use config::{Band, KeywordBand, ScoringConfig};
pub use keyword::KeywordScorer;

/// Audio handed to the voice scorer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum VoiceSample {
    Recording { duration_ms: u64 },
    Upload { file_name: String },
}

pub trait EmotionScorer: Send + Sync {
    fn score_text(&self, text: &str) -> TextAnalysis;
    fn score_voice(&self, sample: &VoiceSample) -> VoiceAnalysis;
}
