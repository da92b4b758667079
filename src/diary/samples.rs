use chrono::NaiveDate;

use crate::models::{DiaryEntry, EmotionScores, MoodPoint};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default()
}

fn emotions(pairs: &[(&str, f64)]) -> EmotionScores {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

pub fn sample_entries() -> Vec<DiaryEntry> {
    vec![
        DiaryEntry {
            date: date(7),
            mood: 7,
            entry: "Had a great day at work. Feeling accomplished and energized.".into(),
            emotions: emotions(&[("happy", 0.8), ("calm", 0.6), ("confident", 0.7)]),
        },
        DiaryEntry {
            date: date(6),
            mood: 4,
            entry: "Feeling a bit anxious about the presentation tomorrow.".into(),
            emotions: emotions(&[("anxious", 0.6), ("worried", 0.5), ("neutral", 0.3)]),
        },
        DiaryEntry {
            date: date(5),
            mood: 8,
            entry: "Spent time with family today. Feeling grateful and content.".into(),
            emotions: emotions(&[("happy", 0.9), ("grateful", 0.8), ("content", 0.7)]),
        },
    ]
}

pub fn mood_trend() -> Vec<MoodPoint> {
    [6, 7, 5, 8, 8, 4, 7]
        .into_iter()
        .zip(1u32..)
        .map(|(mood, day)| MoodPoint {
            date: date(day),
            mood,
        })
        .collect()
}
