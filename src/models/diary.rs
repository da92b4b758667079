use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::analysis::EmotionScores;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub date: NaiveDate,
    /// 1..=10
    pub mood: u8,
    pub entry: String,
    pub emotions: EmotionScores,
}

/// Input for saving a diary entry from the diary panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntryInput {
    pub date: String,
    pub mood: u8,
    pub entry: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MoodPoint {
    pub date: NaiveDate,
    pub mood: u8,
}
