use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use tokio::{
    sync::Mutex,
    time::{self, Instant},
};

use crate::{
    events::{self, EventSink, VOICE_PANEL_CHANGED},
    models::{AnalysisKind, VoiceAnalysis},
    scheduler::DelayedTask,
    scoring::{EmotionScorer, VoiceSample},
    settings::VoiceConfig,
    store::AnalysisStore,
};

use super::{
    state::{VoicePanelSnapshot, VoicePanelState, VoicePhase},
    upload::{validate_upload, UploadedFile},
};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

#[derive(Clone)]
pub struct VoiceAnalysisController {
    state: Arc<Mutex<VoicePanelState>>,
    recorder: Arc<Mutex<DelayedTask>>,
    scorer: Arc<dyn EmotionScorer>,
    store: AnalysisStore,
    events: Arc<dyn EventSink>,
    config: VoiceConfig,
}

impl VoiceAnalysisController {
    pub fn new(
        config: VoiceConfig,
        scorer: Arc<dyn EmotionScorer>,
        store: AnalysisStore,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(VoicePanelState::default())),
            recorder: Arc::new(Mutex::new(DelayedTask::new())),
            scorer,
            store,
            events,
            config,
        }
    }

    pub async fn snapshot(&self) -> VoicePanelSnapshot {
        self.state.lock().await.snapshot(self.config.recording_ms)
    }

    /// Idle starts a simulated recording that stops and analyzes itself after
    /// the recording window. Recording stops early and analyzes what was
    /// captured.
    pub async fn toggle_recording(&self) -> Result<VoicePanelSnapshot> {
        let (snapshot, stopped_ms) = {
            let mut state = self.state.lock().await;
            let stopped_ms = match state.phase {
                VoicePhase::Idle => {
                    state.phase = VoicePhase::Recording;
                    state.recording_anchor = Some(Instant::now());
                    None
                }
                VoicePhase::Recording => Some(state.stop_recording().unwrap_or(0)),
                VoicePhase::Analyzing => bail!("analysis already in progress"),
            };
            (state.snapshot(self.config.recording_ms), stopped_ms)
        };

        let controller = self.clone();
        match stopped_ms {
            Some(duration_ms) => {
                self.recorder.lock().await.cancel();
                log_info!("Recording stopped early after {} ms", duration_ms);
                tokio::spawn(async move {
                    controller.analyze_recording(duration_ms).await;
                });
            }
            None => {
                self.recorder
                    .lock()
                    .await
                    .schedule(self.config.recording(), async move {
                        controller.finish_recording().await;
                    });
                log_info!("Recording started ({} ms window)", self.config.recording_ms);
            }
        }

        self.emit(&snapshot);
        Ok(snapshot)
    }

    /// Validates and keeps the picked file. Rejected files are not kept.
    pub async fn select_file(&self, file: UploadedFile) -> Result<VoicePanelSnapshot> {
        if let Err(err) = validate_upload(&file) {
            log_warn!("Rejected upload {:?} ({:?})", file.name, file.mime_type);
            return Err(err.into());
        }

        let snapshot = {
            let mut state = self.state.lock().await;
            if state.phase == VoicePhase::Analyzing {
                bail!("analysis already in progress");
            }
            state.selected_file = Some(file);
            state.snapshot(self.config.recording_ms)
        };

        self.emit(&snapshot);
        Ok(snapshot)
    }

    pub async fn analyze_selected(&self) -> Result<VoiceAnalysis> {
        let file = {
            let mut state = self.state.lock().await;
            if state.phase != VoicePhase::Idle {
                bail!("voice panel is busy");
            }
            let file = state
                .selected_file
                .clone()
                .ok_or_else(|| anyhow!("no audio file selected"))?;
            state.phase = VoicePhase::Analyzing;
            file
        };
        self.emit_current().await;

        self.run_analysis(VoiceSample::Upload {
            file_name: file.name,
        })
        .await
    }

    /// Drops the recording, file and result. An in-flight analysis still
    /// completes.
    pub async fn reset(&self) -> VoicePanelSnapshot {
        self.recorder.lock().await.cancel();

        let snapshot = {
            let mut state = self.state.lock().await;
            if state.phase == VoicePhase::Recording {
                state.phase = VoicePhase::Idle;
            }
            state.recording_anchor = None;
            state.selected_file = None;
            state.result = None;
            state.snapshot(self.config.recording_ms)
        };

        self.emit(&snapshot);
        snapshot
    }

    async fn finish_recording(&self) {
        let Some(duration_ms) = self.state.lock().await.stop_recording() else {
            return;
        };

        log_info!("Recording stopped after {} ms", duration_ms);
        self.emit_current().await;
        self.analyze_recording(duration_ms).await;
    }

    async fn analyze_recording(&self, duration_ms: u64) {
        if let Err(err) = self
            .run_analysis(VoiceSample::Recording { duration_ms })
            .await
        {
            log_error!("Voice analysis failed: {}", err);
        }
    }

    async fn run_analysis(&self, sample: VoiceSample) -> Result<VoiceAnalysis> {
        time::sleep(self.config.analysis_latency()).await;

        let analysis = self.scorer.score_voice(&sample);
        let record = self.store.add(AnalysisKind::Voice, &analysis);

        {
            let mut state = self.state.lock().await;
            state.result = Some(analysis.clone());
            state.phase = VoicePhase::Idle;
        }

        log_info!(
            "Voice analysis {} complete (risk {:.0})",
            record.id,
            analysis.risk_score
        );

        self.emit_current().await;
        Ok(analysis)
    }

    async fn emit_current(&self) {
        let snapshot = self.snapshot().await;
        self.emit(&snapshot);
    }

    fn emit(&self, snapshot: &VoicePanelSnapshot) {
        events::emit(self.events.as_ref(), VOICE_PANEL_CHANGED, snapshot);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::events::{MemorySink, NullSink};
    use crate::models::RiskLevel;
    use crate::scoring::KeywordScorer;
    use crate::voice::upload::UploadError;

    fn controller() -> (VoiceAnalysisController, AnalysisStore) {
        let events: Arc<dyn EventSink> = Arc::new(NullSink);
        let store = AnalysisStore::new(events.clone());
        let controller = VoiceAnalysisController::new(
            VoiceConfig::default(),
            Arc::new(KeywordScorer::with_seed(4)),
            store.clone(),
            events,
        );
        (controller, store)
    }

    #[tokio::test(start_paused = true)]
    async fn recording_stops_and_analyzes_on_its_own() {
        let (controller, store) = controller();
        let snapshot = controller.toggle_recording().await.unwrap();
        assert_eq!(snapshot.phase, VoicePhase::Recording);

        time::sleep(Duration::from_millis(3100)).await;
        assert_eq!(controller.snapshot().await.phase, VoicePhase::Analyzing);
        assert!(store.is_empty());

        time::sleep(Duration::from_millis(2000)).await;
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.phase, VoicePhase::Idle);
        assert!(snapshot.result.is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].kind, AnalysisKind::Voice);
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_mid_recording_stops_early() {
        let (controller, store) = controller();
        controller.toggle_recording().await.unwrap();
        time::sleep(Duration::from_millis(1000)).await;

        let stopped = controller.toggle_recording().await.unwrap();
        assert_eq!(stopped.phase, VoicePhase::Analyzing);
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(controller.snapshot().await.phase, VoicePhase::Analyzing);
        assert!(controller.toggle_recording().await.is_err());

        time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(controller.snapshot().await.phase, VoicePhase::Idle);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn early_stop_announces_analyzing_and_voice_guidance() {
        let sink = MemorySink::new();
        let events: Arc<dyn EventSink> = Arc::new(sink.clone());
        let controller = VoiceAnalysisController::new(
            VoiceConfig::default(),
            Arc::new(KeywordScorer::with_seed(4)),
            AnalysisStore::new(events.clone()),
            events,
        );

        controller.toggle_recording().await.unwrap();
        time::sleep(Duration::from_millis(1000)).await;
        controller.toggle_recording().await.unwrap();

        let announced = sink.last(VOICE_PANEL_CHANGED).unwrap();
        assert_eq!(announced["phase"], "analyzing");

        time::sleep(Duration::from_millis(2100)).await;
        let risk = controller.snapshot().await.risk.unwrap();
        let expected = match RiskLevel::from_score(risk.score) {
            RiskLevel::High => "Consider speaking with a mental health professional",
            RiskLevel::Moderate => "Monitor your emotional well-being",
            RiskLevel::Low => "Your voice patterns appear stable",
        };
        assert_eq!(risk.guidance, expected);

        let phases: Vec<_> = sink
            .events()
            .into_iter()
            .filter(|(name, _)| name == VOICE_PANEL_CHANGED)
            .map(|(_, payload)| payload["phase"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(phases, ["recording", "analyzing", "idle"]);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_upload_is_not_kept() {
        let (controller, _) = controller();
        let err = controller
            .select_file(UploadedFile::new("scan.png", Some("image/png")))
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<UploadError>().is_some());
        assert!(controller.snapshot().await.selected_file.is_none());
        assert!(controller.analyze_selected().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn uploaded_wav_is_analyzed_once() {
        let (controller, store) = controller();
        let snapshot = controller
            .select_file(UploadedFile::new("checkin.wav", None))
            .await
            .unwrap();
        assert!(snapshot.can_analyze);

        let analysis = controller.analyze_selected().await.unwrap();
        assert!((20.0..60.0).contains(&analysis.risk_score));
        assert_eq!(store.len(), 1);

        let snapshot = controller.reset().await;
        assert!(snapshot.selected_file.is_none());
        assert!(snapshot.result.is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_pending_recording() {
        let (controller, store) = controller();
        controller.toggle_recording().await.unwrap();
        time::sleep(Duration::from_millis(500)).await;
        controller.reset().await;

        time::sleep(Duration::from_millis(6000)).await;
        assert_eq!(controller.snapshot().await.phase, VoicePhase::Idle);
        assert!(store.is_empty());
    }
}
