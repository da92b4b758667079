//! Outbound events to the frontend.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;

const ENABLE_LOGS: bool = true;

use crate::log_warn;

pub const ANALYSES_CHANGED: &str = "analyses-changed";
pub const TEXT_PANEL_CHANGED: &str = "text-panel-changed";
pub const VOICE_PANEL_CHANGED: &str = "voice-panel-changed";
pub const BREATHING_PHASE_CHANGED: &str = "breathing-phase-changed";
pub const TAB_CHANGED: &str = "tab-changed";

pub trait EventSink: Send + Sync + 'static {
    fn emit_value(&self, event: &str, payload: Value) -> anyhow::Result<()>;
}

/// Serializes `payload` and hands it to the sink. Failures are logged; the
/// caller's operation has already happened and stands.
pub fn emit<T: Serialize>(sink: &dyn EventSink, event: &str, payload: &T) {
    let value = match serde_json::to_value(payload) {
        Ok(value) => value,
        Err(err) => {
            log_warn!("Failed to serialize {} payload: {}", event, err);
            return;
        }
    };

    if let Err(err) = sink.emit_value(event, value) {
        log_warn!("Failed to emit {}: {}", event, err);
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit_value(&self, _event: &str, _payload: Value) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Keeps emitted events in memory, in order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, Value)> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn count(&self, event: &str) -> usize {
        self.events()
            .iter()
            .filter(|(name, _)| name == event)
            .count()
    }

    pub fn last(&self, event: &str) -> Option<Value> {
        self.events()
            .into_iter()
            .rev()
            .find(|(name, _)| name == event)
            .map(|(_, payload)| payload)
    }
}

impl EventSink for MemorySink {
    fn emit_value(&self, event: &str, payload: Value) -> anyhow::Result<()> {
        let mut guard = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((event.to_string(), payload));
        Ok(())
    }
}

#[cfg(feature = "desktop")]
impl EventSink for tauri::AppHandle {
    fn emit_value(&self, event: &str, payload: Value) -> anyhow::Result<()> {
        use tauri::Emitter;

        self.emit(event, payload)
            .map_err(|err| anyhow::anyhow!("failed to emit {event}: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        emit(&sink, "a", &1u32);
        emit(&sink, "b", &"two");
        emit(&sink, "a", &3u32);

        assert_eq!(sink.count("a"), 2);
        assert_eq!(sink.last("a"), Some(Value::from(3)));
        let names: Vec<_> = sink.events().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
    }
}
