use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::models::{AnalysisKind, RiskAssessment, VoiceAnalysis};

use super::upload::UploadedFile;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum VoicePhase {
    #[default]
    Idle,
    Recording,
    Analyzing,
}

#[derive(Debug, Clone, Default)]
pub struct VoicePanelState {
    pub phase: VoicePhase,
    pub recording_anchor: Option<Instant>,
    pub selected_file: Option<UploadedFile>,
    pub result: Option<VoiceAnalysis>,
}

impl VoicePanelState {
    pub fn recorded_ms(&self) -> u64 {
        match (self.phase, self.recording_anchor) {
            (VoicePhase::Recording, Some(anchor)) => anchor.elapsed().as_millis() as u64,
            _ => 0,
        }
    }

    /// Moves a running recording to `Analyzing` and returns its length.
    pub fn stop_recording(&mut self) -> Option<u64> {
        if self.phase != VoicePhase::Recording {
            return None;
        }
        let duration_ms = self.recorded_ms();
        self.phase = VoicePhase::Analyzing;
        self.recording_anchor = None;
        Some(duration_ms)
    }

    pub fn snapshot(&self, recording_target_ms: u64) -> VoicePanelSnapshot {
        VoicePanelSnapshot {
            phase: self.phase,
            recorded_ms: self.recorded_ms(),
            recording_target_ms,
            selected_file: self.selected_file.clone(),
            can_analyze: self.phase == VoicePhase::Idle && self.selected_file.is_some(),
            risk: self
                .result
                .as_ref()
                .map(|result| RiskAssessment::from_score(AnalysisKind::Voice, result.risk_score)),
            result: self.result.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoicePanelSnapshot {
    pub phase: VoicePhase,
    pub recorded_ms: u64,
    pub recording_target_ms: u64,
    pub selected_file: Option<UploadedFile>,
    pub can_analyze: bool,
    pub result: Option<VoiceAnalysis>,
    pub risk: Option<RiskAssessment>,
}
