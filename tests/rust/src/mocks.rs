//! Mock collaborator implementations for testing
//!
//! In-memory stand-ins for the external collaborators, recording every
//! interaction for assertion.

use std::sync::RwLock;

use serde_json::{Map, Value};

use provlink_core::telemetry::{TelemetryReporter, KEY_PROPERTY};

/// One recorded `send_event` call
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub name: String,
    pub properties: Map<String, Value>,
}

impl RecordedEvent {
    /// The connection key carried by this event, if any
    pub fn key(&self) -> Option<&str> {
        self.properties.get(KEY_PROPERTY).and_then(Value::as_str)
    }
}

// ============================================================================
// MockTelemetryReporter
// ============================================================================

/// Records every telemetry call, in call order.
#[derive(Default)]
pub struct MockTelemetryReporter {
    events: RwLock<Vec<RecordedEvent>>,
}

impl MockTelemetryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, in call order
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.read().unwrap().clone()
    }

    /// Number of calls recorded for `name`
    pub fn count_for(&self, name: &str) -> usize {
        self.events
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.name == name)
            .count()
    }

    /// Keys carried by calls recorded for `name`, in call order
    pub fn keys_for(&self, name: &str) -> Vec<String> {
        self.events
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.name == name)
            .filter_map(|e| e.key().map(str::to_string))
            .collect()
    }
}

impl TelemetryReporter for MockTelemetryReporter {
    fn send_event(&self, name: &str, properties: Map<String, Value>) {
        self.events.write().unwrap().push(RecordedEvent {
            name: name.to_string(),
            properties,
        });
    }
}
