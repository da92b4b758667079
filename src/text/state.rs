use serde::{Deserialize, Serialize};

use crate::models::{AnalysisKind, RiskAssessment, TextAnalysis};

/// Debounced, non-persisted analysis shown while the user is still typing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LivePreview {
    pub primary_emotion: Option<String>,
    pub analysis: TextAnalysis,
}

impl LivePreview {
    pub fn new(analysis: TextAnalysis) -> Self {
        Self {
            primary_emotion: analysis.primary_emotion().map(str::to_string),
            analysis,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextPanelState {
    pub text: String,
    /// Bumped on every text change; a preview timer only applies to the
    /// revision it was scheduled for.
    pub revision: u64,
    pub preview: Option<LivePreview>,
    pub result: Option<TextAnalysis>,
    pub is_analyzing: bool,
}

impl TextPanelState {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty() && !self.is_analyzing
    }

    pub fn snapshot(&self, max_chars: usize) -> TextPanelSnapshot {
        TextPanelSnapshot {
            text: self.text.clone(),
            char_count: self.char_count(),
            max_chars,
            can_submit: self.can_submit(),
            is_analyzing: self.is_analyzing,
            preview: self.preview.clone(),
            risk: self
                .result
                .as_ref()
                .map(|result| RiskAssessment::from_score(AnalysisKind::Text, result.risk_score)),
            result: self.result.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextPanelSnapshot {
    pub text: String,
    pub char_count: usize,
    pub max_chars: usize,
    pub can_submit: bool,
    pub is_analyzing: bool,
    pub preview: Option<LivePreview>,
    pub result: Option<TextAnalysis>,
    pub risk: Option<RiskAssessment>,
}

/// Caps `text` at `max_chars` Unicode scalar values.
pub fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
    text
}
