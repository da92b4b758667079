//! Emotion diary: seeded sample entries, the seven-day mood trend, and entries
//! written this session. Nothing here reaches the analysis store or disk.

#[cfg(feature = "desktop")]
pub mod commands;
pub mod samples;

use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{DiaryEntry, DiaryEntryInput, EmotionScores, MoodPoint};

const ENABLE_LOGS: bool = true;

use crate::log_info;

pub const MOOD_EMOJIS: [&str; 10] = ["😢", "😟", "😐", "🙂", "😊", "😄", "🤗", "😍", "🥰", "🌟"];
pub const MIN_MOOD: u8 = 1;
pub const MAX_MOOD: u8 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiaryError {
    #[error("diary entry is empty")]
    EmptyEntry,
    #[error("mood {0} is outside 1-10")]
    MoodOutOfRange(u8),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub fn mood_emoji(mood: u8) -> Option<&'static str> {
    if (MIN_MOOD..=MAX_MOOD).contains(&mood) {
        Some(MOOD_EMOJIS[usize::from(mood - 1)])
    } else {
        None
    }
}

#[derive(Clone)]
pub struct DiaryBook {
    written: Arc<RwLock<Vec<DiaryEntry>>>,
}

impl Default for DiaryBook {
    fn default() -> Self {
        Self::new()
    }
}

impl DiaryBook {
    pub fn new() -> Self {
        Self {
            written: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Sample and session entries, newest date first. Same-day entries keep
    /// the most recently written one on top.
    pub fn entries(&self) -> Vec<DiaryEntry> {
        let mut entries: Vec<DiaryEntry> = {
            let written = match self.written.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            written.iter().rev().cloned().collect()
        };
        entries.extend(samples::sample_entries());
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    pub fn mood_trend(&self) -> Vec<MoodPoint> {
        samples::mood_trend()
    }

    pub fn save_entry(&self, input: DiaryEntryInput) -> Result<DiaryEntry, DiaryError> {
        let text = input.entry.trim();
        if text.is_empty() {
            return Err(DiaryError::EmptyEntry);
        }
        if !(MIN_MOOD..=MAX_MOOD).contains(&input.mood) {
            return Err(DiaryError::MoodOutOfRange(input.mood));
        }
        let date = NaiveDate::parse_from_str(input.date.trim(), "%Y-%m-%d")
            .map_err(|_| DiaryError::InvalidDate(input.date.clone()))?;

        let entry = DiaryEntry {
            date,
            mood: input.mood,
            entry: text.to_string(),
            emotions: EmotionScores::new(),
        };

        {
            let mut written = match self.written.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            written.push(entry.clone());
        }

        log_info!(
            "Saved diary entry for {} (mood {}, {} chars)",
            entry.date,
            entry.mood,
            entry.entry.chars().count()
        );

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(date: &str, mood: u8, entry: &str) -> DiaryEntryInput {
        DiaryEntryInput {
            date: date.into(),
            mood,
            entry: entry.into(),
        }
    }

    #[test]
    fn emoji_scale_covers_one_to_ten() {
        assert_eq!(mood_emoji(1), Some("😢"));
        assert_eq!(mood_emoji(10), Some("🌟"));
        assert_eq!(mood_emoji(0), None);
        assert_eq!(mood_emoji(11), None);
    }

    #[test]
    fn saved_entry_is_listed_first() {
        let diary = DiaryBook::new();
        assert_eq!(diary.entries().len(), 3);

        let saved = diary
            .save_entry(input("2024-01-08", 6, "  Quiet evening walk.  "))
            .unwrap();
        assert_eq!(saved.entry, "Quiet evening walk.");

        let entries = diary.entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0], saved);
        assert!(entries.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn invalid_input_is_rejected() {
        let diary = DiaryBook::new();
        assert_eq!(
            diary.save_entry(input("2024-01-08", 5, "   ")),
            Err(DiaryError::EmptyEntry)
        );
        assert_eq!(
            diary.save_entry(input("2024-01-08", 0, "text")),
            Err(DiaryError::MoodOutOfRange(0))
        );
        assert_eq!(
            diary.save_entry(input("08/01/2024", 5, "text")),
            Err(DiaryError::InvalidDate("08/01/2024".into()))
        );
        assert_eq!(diary.entries().len(), 3);
    }

    #[test]
    fn trend_spans_a_week() {
        let trend = DiaryBook::new().mood_trend();
        assert_eq!(trend.len(), 7);
        assert!(trend.iter().all(|p| mood_emoji(p.mood).is_some()));
    }
}
