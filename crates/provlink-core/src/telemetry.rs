//! Telemetry reporting
//!
//! Narrow capability interface for the external telemetry collaborator.
//! The service calls it unconditionally on every state transition and
//! never inspects the outcome - transport, batching, and error handling
//! are entirely the collaborator's concern.

use serde_json::{Map, Value};
use tracing::debug;

/// Telemetry event name reported when a provider connects
pub const CONNECTED_EVENT: &str = "remoteProviders/connected";

/// Telemetry event name reported when a provider disconnects
pub const DISCONNECTED_EVENT: &str = "remoteProviders/disconnected";

/// Property carrying the connection key on both telemetry events
pub const KEY_PROPERTY: &str = "remoteProviders.key";

/// Trait for reporting telemetry events
///
/// Implementations forward to an analytics pipeline, a log sink, or a
/// recording mock in tests.
///
/// **Object Safety**: Uses `&str` instead of `impl Into<String>` for trait
/// object compatibility.
pub trait TelemetryReporter: Send + Sync {
    /// Report one event. Fire-and-forget: the caller does not await,
    /// retry, or observe failure.
    fn send_event(&self, name: &str, properties: Map<String, Value>);
}

/// Build the property map carried by both connection telemetry events.
pub(crate) fn key_properties(key: &str) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(KEY_PROPERTY.to_string(), Value::String(key.to_string()));
    properties
}

/// Telemetry reporter that writes structured log output.
///
/// Default for hosts without a telemetry pipeline.
#[derive(Default)]
pub struct LogTelemetryReporter;

impl LogTelemetryReporter {
    pub fn new() -> Self {
        Self
    }
}

impl TelemetryReporter for LogTelemetryReporter {
    fn send_event(&self, name: &str, properties: Map<String, Value>) {
        let properties = Value::Object(properties);
        debug!(
            event = name,
            properties = %properties,
            "[Telemetry] Reported event"
        );
    }
}
