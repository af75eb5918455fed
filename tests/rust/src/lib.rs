//! Shared test utilities and fixtures for provlink integration tests.

pub use provlink_core::{ConnectionReason, ConnectionStateChangeEvent};

/// Mock collaborator implementations
pub mod mocks;
pub use mocks::MockTelemetryReporter;

/// Initialise tracing output for a test binary. Safe to call repeatedly.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Event testing utilities
pub mod events {
    use provlink_core::{ConnectionStateChangeEvent, EventReceiver};
    use std::time::Duration;

    /// Default test timeout (5 seconds)
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Collect up to `n` events from a receiver, stopping early at the
    /// timeout. Under a paused test clock, awaiting auto-advances time to
    /// the next pending settle deadline.
    pub async fn collect_events(
        rx: &mut EventReceiver,
        n: usize,
        timeout: Duration,
    ) -> Vec<ConnectionStateChangeEvent> {
        let mut events = Vec::with_capacity(n);
        for _ in 0..n {
            match tokio::time::timeout(timeout, rx.recv()).await {
                Ok(Some(event)) => events.push(event),
                Ok(None) => break, // Stream closed
                Err(_) => break,   // Timeout
            }
        }
        events
    }

    /// Drain everything currently buffered in the channel without waiting.
    pub fn drain(rx: &mut EventReceiver) -> Vec<ConnectionStateChangeEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }
}
