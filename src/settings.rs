use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

pub const CONFIG_ENV: &str = "MINDSENSE_CONFIG";
pub const DEBUG_ENV: &str = "MINDSENSE_DEBUG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TextConfig {
    pub debounce_ms: u64,
    /// Live preview needs strictly more characters than this.
    pub preview_threshold_chars: usize,
    pub max_chars: usize,
    pub submit_latency_ms: u64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            preview_threshold_chars: 10,
            max_chars: 1000,
            submit_latency_ms: 1500,
        }
    }
}

impl TextConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceConfig {
    pub recording_ms: u64,
    pub analysis_latency_ms: u64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            recording_ms: 3000,
            analysis_latency_ms: 2000,
        }
    }
}

impl VoiceConfig {
    pub fn recording(&self) -> Duration {
        Duration::from_millis(self.recording_ms)
    }

    pub fn analysis_latency(&self) -> Duration {
        Duration::from_millis(self.analysis_latency_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BreathingConfig {
    pub inhale_ms: u64,
    pub hold_ms: u64,
    pub exhale_ms: u64,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            inhale_ms: 4000,
            hold_ms: 4000,
            exhale_ms: 6000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    pub recent_limit: usize,
    /// Shown while the store is empty.
    pub baseline_risk: f64,
    pub baseline_mood: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: 5,
            baseline_risk: 35.0,
            baseline_mood: 72.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub text: TextConfig,
    pub voice: VoiceConfig,
    pub breathing: BreathingConfig,
    pub dashboard: DashboardConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Reads a JSON config file. Missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Config from `MINDSENSE_CONFIG` when it names a readable file, defaults
    /// otherwise.
    pub fn load() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(raw) => {
                let path = Path::new(&raw);
                if path.exists() {
                    match Self::from_file(path) {
                        Ok(config) => {
                            log_info!("Loaded config from {}", path.display());
                            config
                        }
                        Err(err) => {
                            log_warn!("{:#}; using defaults", err);
                            Self::default()
                        }
                    }
                } else {
                    log_warn!("{} points at missing {}", CONFIG_ENV, path.display());
                    Self::default()
                }
            }
            None => Self::default(),
        }
    }
}

/// `MINDSENSE_DEBUG=1|true` turns on debug logging.
pub fn debug_requested() -> bool {
    std::env::var(DEBUG_ENV)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
