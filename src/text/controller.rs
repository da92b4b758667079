use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use tokio::{sync::Mutex, time};

use crate::{
    events::{self, EventSink, TEXT_PANEL_CHANGED},
    models::{AnalysisKind, TextAnalysis},
    scheduler::DelayedTask,
    scoring::EmotionScorer,
    settings::TextConfig,
    store::AnalysisStore,
};

use super::state::{truncate_chars, LivePreview, TextPanelSnapshot, TextPanelState};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

pub const SAMPLE_TEXTS: [&str; 3] = [
    "I've been feeling really anxious about work lately, and it's hard to sleep at night.",
    "Today was a good day! I felt productive and accomplished several tasks.",
    "I feel overwhelmed and don't know how to cope with everything going on.",
];

#[derive(Clone)]
pub struct TextAnalysisController {
    state: Arc<Mutex<TextPanelState>>,
    debounce: Arc<Mutex<DelayedTask>>,
    scorer: Arc<dyn EmotionScorer>,
    store: AnalysisStore,
    events: Arc<dyn EventSink>,
    config: TextConfig,
}

impl TextAnalysisController {
    pub fn new(
        config: TextConfig,
        scorer: Arc<dyn EmotionScorer>,
        store: AnalysisStore,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(TextPanelState::default())),
            debounce: Arc::new(Mutex::new(DelayedTask::new())),
            scorer,
            store,
            events,
            config,
        }
    }

    pub async fn snapshot(&self) -> TextPanelSnapshot {
        self.state.lock().await.snapshot(self.config.max_chars)
    }

    /// Replaces the input text and restarts the preview debounce. Text at or
    /// under the threshold drops the preview right away.
    pub async fn set_text(&self, text: String) -> TextPanelSnapshot {
        let text = truncate_chars(text, self.config.max_chars);

        let (revision, previewable, snapshot) = {
            let mut state = self.state.lock().await;
            if state.text == text {
                return state.snapshot(self.config.max_chars);
            }

            state.text = text;
            state.revision = state.revision.wrapping_add(1);
            let previewable = state.char_count() > self.config.preview_threshold_chars;
            if !previewable {
                state.preview = None;
            }
            (
                state.revision,
                previewable,
                state.snapshot(self.config.max_chars),
            )
        };

        {
            let mut debounce = self.debounce.lock().await;
            if previewable {
                let controller = self.clone();
                debounce.schedule(self.config.debounce(), async move {
                    controller.refresh_preview(revision).await;
                });
            } else {
                debounce.cancel();
            }
        }

        self.emit(&snapshot);
        snapshot
    }

    pub async fn use_sample(&self, index: usize) -> Result<TextPanelSnapshot> {
        let sample = SAMPLE_TEXTS
            .get(index)
            .ok_or_else(|| anyhow!("no sample text at index {index}"))?;
        Ok(self.set_text((*sample).to_string()).await)
    }

    /// Full analysis: simulated latency, one scored result, one store record.
    pub async fn submit(&self) -> Result<TextAnalysis> {
        let text = {
            let mut state = self.state.lock().await;
            if state.text.trim().is_empty() {
                bail!("nothing to analyze");
            }
            if state.is_analyzing {
                bail!("analysis already in progress");
            }
            state.is_analyzing = true;
            state.text.clone()
        };
        self.emit_current().await;

        time::sleep(self.config.submit_latency()).await;

        let analysis = self.scorer.score_text(&text);
        let record = self.store.add(AnalysisKind::Text, &analysis);

        {
            let mut state = self.state.lock().await;
            state.result = Some(analysis.clone());
            state.is_analyzing = false;
        }

        log_info!(
            "Text analysis {} complete ({} words, risk {:.0})",
            record.id,
            analysis.word_count,
            analysis.risk_score
        );

        self.emit_current().await;
        Ok(analysis)
    }

    /// Clears input, preview and result. An in-flight submission still lands
    /// in the store.
    pub async fn reset(&self) -> TextPanelSnapshot {
        self.debounce.lock().await.cancel();

        let snapshot = {
            let mut state = self.state.lock().await;
            let is_analyzing = state.is_analyzing;
            let revision = state.revision.wrapping_add(1);
            *state = TextPanelState {
                revision,
                is_analyzing,
                ..TextPanelState::default()
            };
            state.snapshot(self.config.max_chars)
        };

        self.emit(&snapshot);
        snapshot
    }

    async fn refresh_preview(&self, revision: u64) {
        let snapshot = {
            let mut state = self.state.lock().await;
            if state.revision != revision {
                return;
            }

            if state.char_count() > self.config.preview_threshold_chars {
                let analysis = self.scorer.score_text(&state.text);
                let preview = LivePreview::new(analysis);
                log_debug!(
                    "Live preview for revision {}: {:?}",
                    revision,
                    preview.primary_emotion
                );
                state.preview = Some(preview);
            } else {
                state.preview = None;
            }
            state.snapshot(self.config.max_chars)
        };

        self.emit(&snapshot);
    }

    async fn emit_current(&self) {
        let snapshot = self.snapshot().await;
        self.emit(&snapshot);
    }

    fn emit(&self, snapshot: &TextPanelSnapshot) {
        events::emit(self.events.as_ref(), TEXT_PANEL_CHANGED, snapshot);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::events::{MemorySink, NullSink};
    use crate::scoring::KeywordScorer;

    fn controller() -> (TextAnalysisController, AnalysisStore) {
        let events: Arc<dyn EventSink> = Arc::new(NullSink);
        let store = AnalysisStore::new(events.clone());
        let controller = TextAnalysisController::new(
            TextConfig::default(),
            Arc::new(KeywordScorer::with_seed(1)),
            store.clone(),
            events,
        );
        (controller, store)
    }

    #[tokio::test(start_paused = true)]
    async fn typing_every_500ms_never_previews() {
        let (controller, store) = controller();
        let mut text = String::from("I am typing");

        for _ in 0..10 {
            text.push('!');
            controller.set_text(text.clone()).await;
            time::sleep(Duration::from_millis(500)).await;
            assert!(controller.snapshot().await.preview.is_none());
        }

        time::sleep(Duration::from_millis(501)).await;
        assert!(controller.snapshot().await.preview.is_some());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn preview_needs_more_than_ten_chars() {
        let (controller, _) = controller();

        controller.set_text("0123456789".into()).await;
        time::sleep(Duration::from_millis(1500)).await;
        assert!(controller.snapshot().await.preview.is_none());

        controller.set_text("0123456789a".into()).await;
        time::sleep(Duration::from_millis(999)).await;
        assert!(controller.snapshot().await.preview.is_none());
        time::sleep(Duration::from_millis(2)).await;

        let snapshot = controller.snapshot().await;
        let preview = snapshot.preview.expect("preview after debounce window");
        assert!(preview.primary_emotion.is_some());
        assert_eq!(preview.analysis.emotions.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn shrinking_below_threshold_clears_preview_immediately() {
        let (controller, _) = controller();
        controller.set_text("long enough text".into()).await;
        time::sleep(Duration::from_millis(1100)).await;
        assert!(controller.snapshot().await.preview.is_some());

        let snapshot = controller.set_text("short".into()).await;
        assert!(snapshot.preview.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn preview_scores_the_latest_text() {
        let sink = MemorySink::new();
        let events: Arc<dyn EventSink> = Arc::new(sink.clone());
        let store = AnalysisStore::new(events.clone());
        let controller = TextAnalysisController::new(
            TextConfig::default(),
            Arc::new(KeywordScorer::with_seed(2)),
            store,
            events,
        );

        controller.set_text("first draft text".into()).await;
        time::sleep(Duration::from_millis(300)).await;
        controller.set_text("second draft, much longer".into()).await;
        time::sleep(Duration::from_millis(1100)).await;

        let preview = controller.snapshot().await.preview.unwrap();
        assert_eq!(preview.analysis.word_count, 4);

        let previews = sink
            .events()
            .into_iter()
            .filter(|(name, payload)| name == TEXT_PANEL_CHANGED && !payload["preview"].is_null())
            .count();
        assert_eq!(previews, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_writes_one_record_after_latency() {
        let (controller, store) = controller();
        controller
            .set_text("I feel very happy and hopeful today".into())
            .await;

        let pending = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit().await }
        });

        time::sleep(Duration::from_millis(10)).await;
        assert!(controller.snapshot().await.is_analyzing);
        assert!(controller.submit().await.is_err());

        time::sleep(Duration::from_millis(1499)).await;
        let analysis = pending.await.unwrap().unwrap();

        assert_eq!(store.len(), 1);
        let record = &store.snapshot()[0];
        assert_eq!(record.kind, AnalysisKind::Text);
        assert_eq!(record.emotions, analysis.emotions);

        let snapshot = controller.snapshot().await;
        assert!(!snapshot.is_analyzing);
        assert_eq!(snapshot.result, Some(analysis));
        assert!(snapshot.risk.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_submission_is_rejected() {
        let (controller, store) = controller();
        assert!(controller.submit().await.is_err());
        controller.set_text("   ".into()).await;
        assert!(controller.submit().await.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn input_is_capped_and_reset_clears_everything() {
        let (controller, _) = controller();
        let snapshot = controller.set_text("x".repeat(1200)).await;
        assert_eq!(snapshot.char_count, 1000);

        let snapshot = controller.reset().await;
        assert!(snapshot.text.is_empty());
        time::sleep(Duration::from_millis(2000)).await;
        assert!(controller.snapshot().await.preview.is_none());

        let snapshot = controller.use_sample(1).await.unwrap();
        assert_eq!(snapshot.text, SAMPLE_TEXTS[1]);
        assert!(controller.use_sample(3).await.is_err());
    }
}
