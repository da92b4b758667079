pub mod analysis;
pub mod diary;

pub use analysis::{
    primary_emotion, AnalysisKind, AnalysisRecord, EmotionScores, RiskAssessment, RiskLevel,
    ScoredAnalysis, Sentiment, TextAnalysis, VoiceAnalysis, VoiceFeatures,
};
pub use diary::{DiaryEntry, DiaryEntryInput, MoodPoint};
