//! Session-lifetime list of finished analyses, shared by every panel.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::events::{self, EventSink, ANALYSES_CHANGED};
use crate::models::{AnalysisKind, AnalysisRecord, EmotionScores, ScoredAnalysis};

const ENABLE_LOGS: bool = true;

use crate::log_info;

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct AnalysesChangedEvent {
    total: usize,
    latest: Option<AnalysisRecord>,
}

/// Insertion-ordered, append-only (short of `clear`) analysis list. Clones
/// share the same list.
#[derive(Clone)]
pub struct AnalysisStore {
    records: Arc<RwLock<Vec<AnalysisRecord>>>,
    events: Arc<dyn EventSink>,
}

impl AnalysisStore {
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            events,
        }
    }

    /// Normalizes `analysis` into a record and appends it.
    pub fn add(&self, kind: AnalysisKind, analysis: &dyn ScoredAnalysis) -> AnalysisRecord {
        let record = AnalysisRecord {
            id: Uuid::new_v4().to_string(),
            kind,
            emotions: normalize_emotions(analysis.emotions()),
            risk_score: clamp_or_zero(analysis.risk_score(), 100.0),
            created_at: analysis.timestamp(),
        };

        let total = {
            let mut guard = self.write();
            guard.push(record.clone());
            guard.len()
        };

        log_info!(
            "Stored {} analysis {} (risk {:.0}, {} total)",
            kind.as_str(),
            record.id,
            record.risk_score,
            total
        );

        events::emit(
            self.events.as_ref(),
            ANALYSES_CHANGED,
            &AnalysesChangedEvent {
                total,
                latest: Some(record.clone()),
            },
        );

        record
    }

    pub fn clear(&self) {
        let cleared = {
            let mut guard = self.write();
            let cleared = guard.len();
            guard.clear();
            cleared
        };

        log_info!("Cleared {} analyses at {}", cleared, Utc::now());

        events::emit(
            self.events.as_ref(),
            ANALYSES_CHANGED,
            &AnalysesChangedEvent {
                total: 0,
                latest: None,
            },
        );
    }

    pub fn snapshot(&self) -> Vec<AnalysisRecord> {
        self.read().clone()
    }

    /// Up to `limit` most recent records, newest first.
    pub fn recent(&self, limit: usize) -> Vec<AnalysisRecord> {
        self.read().iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<AnalysisRecord>> {
        match self.records.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<AnalysisRecord>> {
        match self.records.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn normalize_emotions(emotions: &EmotionScores) -> EmotionScores {
    emotions
        .iter()
        .map(|(name, value)| (name.clone(), clamp_or_zero(*value, 1.0)))
        .collect()
}

fn clamp_or_zero(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{MemorySink, NullSink};
    use crate::models::{Sentiment, TextAnalysis};

    fn analysis(risk: f64, happy: f64) -> TextAnalysis {
        let mut emotions = EmotionScores::new();
        emotions.insert("happy".into(), happy);
        TextAnalysis {
            emotions,
            sentiment: Sentiment {
                positive: 0.5,
                negative: 0.2,
                neutral: 0.3,
            },
            risk_score: risk,
            key_phrases: Vec::new(),
            word_count: 3,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn add_preserves_insertion_order() {
        let store = AnalysisStore::new(Arc::new(NullSink));
        for (i, risk) in [10.0, 50.0, 30.0].into_iter().enumerate() {
            store.add(AnalysisKind::Text, &analysis(risk, 0.1));
            assert_eq!(store.len(), i + 1);
        }

        let risks: Vec<f64> = store.snapshot().iter().map(|r| r.risk_score).collect();
        assert_eq!(risks, vec![10.0, 50.0, 30.0]);
    }

    #[test]
    fn clear_empties_regardless_of_length() {
        let store = AnalysisStore::new(Arc::new(NullSink));
        store.clear();
        assert!(store.is_empty());

        for _ in 0..7 {
            store.add(AnalysisKind::Voice, &analysis(20.0, 0.2));
        }
        store.clear();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn add_clamps_out_of_range_figures() {
        let store = AnalysisStore::new(Arc::new(NullSink));
        let record = store.add(AnalysisKind::Text, &analysis(140.0, 1.7));
        assert_eq!(record.risk_score, 100.0);
        assert_eq!(record.emotions["happy"], 1.0);

        let record = store.add(AnalysisKind::Text, &analysis(f64::NAN, -0.3));
        assert_eq!(record.risk_score, 0.0);
        assert_eq!(record.emotions["happy"], 0.0);
    }

    #[test]
    fn recent_is_newest_first_and_bounded() {
        let store = AnalysisStore::new(Arc::new(NullSink));
        for risk in 1..=7 {
            store.add(AnalysisKind::Text, &analysis(risk as f64, 0.1));
        }
        let recent: Vec<f64> = store.recent(5).iter().map(|r| r.risk_score).collect();
        assert_eq!(recent, vec![7.0, 6.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn clones_share_records_and_changes_are_emitted() {
        let sink = MemorySink::new();
        let store = AnalysisStore::new(Arc::new(sink.clone()));
        let other = store.clone();

        other.add(AnalysisKind::Voice, &analysis(25.0, 0.3));
        assert_eq!(store.len(), 1);
        store.clear();
        assert!(other.is_empty());

        assert_eq!(sink.count(ANALYSES_CHANGED), 2);
        let last = sink.last(ANALYSES_CHANGED).unwrap();
        assert_eq!(last["total"], 0);
    }
}
