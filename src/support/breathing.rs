use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::{sync::Mutex, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

use crate::{
    events::{self, EventSink, BREATHING_PHASE_CHANGED},
    settings::BreathingConfig,
};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum BreathingPhase {
    #[default]
    Inhale,
    Hold,
    Exhale,
}

impl BreathingPhase {
    pub const CYCLE: [BreathingPhase; 3] = [
        BreathingPhase::Inhale,
        BreathingPhase::Hold,
        BreathingPhase::Exhale,
    ];

    pub fn prompt(&self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "Breathe In",
            BreathingPhase::Hold => "Hold",
            BreathingPhase::Exhale => "Breathe Out",
        }
    }

    fn duration(&self, config: &BreathingConfig) -> Duration {
        let ms = match self {
            BreathingPhase::Inhale => config.inhale_ms,
            BreathingPhase::Hold => config.hold_ms,
            BreathingPhase::Exhale => config.exhale_ms,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BreathingState {
    pub active: bool,
    pub phase: BreathingPhase,
    pub prompt: String,
    pub completed_cycles: u32,
}

impl BreathingState {
    fn idle() -> Self {
        Self {
            prompt: BreathingPhase::Inhale.prompt().to_string(),
            ..Self::default()
        }
    }
}

struct Sequencer {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

/// Paced breathing loop: inhale, hold, exhale, repeated until stopped.
#[derive(Clone)]
pub struct BreathingExercise {
    state: Arc<Mutex<BreathingState>>,
    sequencer: Arc<Mutex<Option<Sequencer>>>,
    events: Arc<dyn EventSink>,
    config: BreathingConfig,
}

impl BreathingExercise {
    pub fn new(config: BreathingConfig, events: Arc<dyn EventSink>) -> Self {
        Self {
            state: Arc::new(Mutex::new(BreathingState::idle())),
            sequencer: Arc::new(Mutex::new(None)),
            events,
            config,
        }
    }

    pub async fn state(&self) -> BreathingState {
        self.state.lock().await.clone()
    }

    /// No-op when already running.
    pub async fn start(&self) -> BreathingState {
        let mut sequencer = self.sequencer.lock().await;
        if sequencer.is_some() {
            return self.state().await;
        }

        {
            let mut state = self.state.lock().await;
            *state = BreathingState {
                active: true,
                ..BreathingState::idle()
            };
        }

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(breathing_loop(
            self.state.clone(),
            self.events.clone(),
            self.config.clone(),
            cancel_token.clone(),
        ));
        *sequencer = Some(Sequencer {
            handle,
            cancel_token,
        });

        log_info!("Breathing exercise started");
        self.state().await
    }

    /// Cancels the loop and resets the phase to inhale.
    pub async fn stop(&self) -> Result<BreathingState> {
        let sequencer = self.sequencer.lock().await.take();

        if let Some(sequencer) = sequencer {
            sequencer.cancel_token.cancel();
            sequencer
                .handle
                .await
                .context("breathing sequencer failed to join")?;
            log_info!("Breathing exercise stopped");
        }

        let state = {
            let mut state = self.state.lock().await;
            *state = BreathingState::idle();
            state.clone()
        };
        events::emit(self.events.as_ref(), BREATHING_PHASE_CHANGED, &state);
        Ok(state)
    }
}

async fn breathing_loop(
    state: Arc<Mutex<BreathingState>>,
    events: Arc<dyn EventSink>,
    config: BreathingConfig,
    cancel_token: CancellationToken,
) {
    loop {
        for phase in BreathingPhase::CYCLE {
            let snapshot = {
                let mut guard = state.lock().await;
                guard.phase = phase;
                guard.prompt = phase.prompt().to_string();
                guard.clone()
            };
            log_debug!("Breathing phase {:?}", phase);
            events::emit(events.as_ref(), BREATHING_PHASE_CHANGED, &snapshot);

            tokio::select! {
                _ = cancel_token.cancelled() => return,
                _ = time::sleep(phase.duration(&config)) => {}
            }
        }

        state.lock().await.completed_cycles += 1;
    }
}
