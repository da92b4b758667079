//! Summary cards and chart series for the dashboard panel.

#[cfg(feature = "desktop")]
pub mod commands;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    models::{AnalysisKind, AnalysisRecord, RiskLevel},
    settings::DashboardConfig,
    store::AnalysisStore,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub anxiety: u8,
    pub mood: u8,
    pub stress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyStat {
    pub day: String,
    pub voice: u8,
    pub text: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_analyses: usize,
    pub voice_analyses: usize,
    pub text_analyses: usize,
    pub current_risk: f64,
    pub risk_level: RiskLevel,
    pub overall_mood: f64,
    /// Newest first.
    pub recent: Vec<AnalysisRecord>,
    pub trend: Vec<TrendPoint>,
    pub weekly_stats: Vec<WeeklyStat>,
}

/// Reads the store as it is right now.
pub fn snapshot(store: &AnalysisStore, config: &DashboardConfig) -> DashboardSnapshot {
    let records = store.snapshot();
    let recent: Vec<AnalysisRecord> = records
        .iter()
        .rev()
        .take(config.recent_limit)
        .cloned()
        .collect();

    let current_risk = mean_risk(&recent).unwrap_or(config.baseline_risk);
    let voice_analyses = records
        .iter()
        .filter(|r| r.kind == AnalysisKind::Voice)
        .count();

    DashboardSnapshot {
        total_analyses: records.len(),
        voice_analyses,
        text_analyses: records.len() - voice_analyses,
        current_risk,
        risk_level: RiskLevel::from_score(current_risk),
        overall_mood: config.baseline_mood,
        recent,
        trend: trend_series(),
        weekly_stats: weekly_stats(),
    }
}

fn mean_risk(records: &[AnalysisRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|r| r.risk_score).sum();
    Some(total / records.len() as f64)
}

pub fn trend_series() -> Vec<TrendPoint> {
    [
        (30, 70, 40),
        (25, 75, 35),
        (35, 65, 45),
        (20, 80, 30),
        (28, 72, 38),
        (22, 78, 32),
        (18, 85, 25),
    ]
    .into_iter()
    .zip(1u32..)
    .map(|((anxiety, mood, stress), day)| TrendPoint {
        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default(),
        anxiety,
        mood,
        stress,
    })
    .collect()
}

pub fn weekly_stats() -> Vec<WeeklyStat> {
    [
        ("Mon", 65, 70),
        ("Tue", 72, 68),
        ("Wed", 58, 75),
        ("Thu", 80, 77),
        ("Fri", 68, 72),
        ("Sat", 85, 80),
        ("Sun", 78, 82),
    ]
    .into_iter()
    .map(|(day, voice, text)| WeeklyStat {
        day: day.into(),
        voice,
        text,
    })
    .collect()
}
