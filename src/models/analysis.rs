//! Analysis results produced by the scorers and the normalized record kept in
//! the session store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emotion name to intensity in `[0, 1]`. Values need not sum to 1.
pub type EmotionScores = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisKind {
    Voice,
    Text,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Voice => "voice",
            AnalysisKind::Text => "text",
        }
    }
}

/// Normalized summary appended to the store after a full analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    pub kind: AnalysisKind,
    pub emotions: EmotionScores,
    pub risk_score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sentiment {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub emotions: EmotionScores,
    pub sentiment: Sentiment,
    pub risk_score: f64,
    pub key_phrases: Vec<String>,
    pub word_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl TextAnalysis {
    /// Emotion with the highest intensity; ties resolve to the name that
    /// sorts first.
    pub fn primary_emotion(&self) -> Option<&str> {
        primary_emotion(&self.emotions)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceFeatures {
    /// Hz
    pub pitch: f64,
    pub energy: f64,
    /// Words per minute.
    pub speaking_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAnalysis {
    pub emotions: EmotionScores,
    pub risk_score: f64,
    pub features: VoiceFeatures,
    pub timestamp: DateTime<Utc>,
}

/// What the store needs from a finished analysis.
pub trait ScoredAnalysis {
    fn emotions(&self) -> &EmotionScores;
    fn risk_score(&self) -> f64;
    fn timestamp(&self) -> DateTime<Utc>;
}

impl ScoredAnalysis for TextAnalysis {
    fn emotions(&self) -> &EmotionScores {
        &self.emotions
    }

    fn risk_score(&self) -> f64 {
        self.risk_score
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl ScoredAnalysis for VoiceAnalysis {
    fn emotions(&self) -> &EmotionScores {
        &self.emotions
    }

    fn risk_score(&self) -> f64 {
        self.risk_score
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

pub fn primary_emotion(emotions: &EmotionScores) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;
    for (name, value) in emotions {
        match best {
            Some((_, top)) if *value <= top => {}
            _ => best = Some((name.as_str(), *value)),
        }
    }
    best.map(|(name, _)| name)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score > 60.0 {
            RiskLevel::High
        } else if score > 40.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Message the panel for `kind` shows next to the score.
    pub fn guidance(&self, kind: AnalysisKind) -> &'static str {
        match (kind, self) {
            (AnalysisKind::Text, RiskLevel::High) => {
                "Your text suggests you might benefit from professional support"
            }
            (AnalysisKind::Text, RiskLevel::Moderate) => {
                "Consider self-care practices and monitoring your mood"
            }
            (AnalysisKind::Text, RiskLevel::Low) => "Your emotional expression appears balanced",
            (AnalysisKind::Voice, RiskLevel::High) => {
                "Consider speaking with a mental health professional"
            }
            (AnalysisKind::Voice, RiskLevel::Moderate) => "Monitor your emotional well-being",
            (AnalysisKind::Voice, RiskLevel::Low) => "Your voice patterns appear stable",
        }
    }
}

/// Risk score with its classification, as the panels display it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub score: f64,
    pub level: RiskLevel,
    pub guidance: String,
}

impl RiskAssessment {
    pub fn from_score(kind: AnalysisKind, score: f64) -> Self {
        let level = RiskLevel::from_score(score);
        Self {
            score,
            level,
            guidance: level.guidance(kind).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_boundaries_are_exclusive() {
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40.5), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(60.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(60.1), RiskLevel::High);
    }

    #[test]
    fn guidance_follows_the_panel() {
        let text = RiskAssessment::from_score(AnalysisKind::Text, 50.0);
        let voice = RiskAssessment::from_score(AnalysisKind::Voice, 50.0);
        assert_eq!(text.level, voice.level);
        assert_eq!(text.guidance, "Consider self-care practices and monitoring your mood");
        assert_eq!(voice.guidance, "Monitor your emotional well-being");
        assert_eq!(
            RiskAssessment::from_score(AnalysisKind::Voice, 75.0).guidance,
            "Consider speaking with a mental health professional"
        );
        assert_eq!(
            RiskAssessment::from_score(AnalysisKind::Voice, 10.0).guidance,
            "Your voice patterns appear stable"
        );
    }

    #[test]
    fn primary_emotion_picks_highest_score() {
        let mut emotions = EmotionScores::new();
        emotions.insert("sad".into(), 0.2);
        emotions.insert("happy".into(), 0.7);
        emotions.insert("neutral".into(), 0.4);
        assert_eq!(primary_emotion(&emotions), Some("happy"));
        assert_eq!(primary_emotion(&EmotionScores::new()), None);
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = AnalysisRecord {
            id: "a".into(),
            kind: AnalysisKind::Text,
            emotions: EmotionScores::new(),
            risk_score: 12.0,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "text");
        assert!(json.get("riskScore").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
