//! Provider connection registry and notifier
//!
//! Source of truth for which remote providers are currently
//! authenticated/active. State changes are published on two streams:
//!
//! - **immediate**: enqueued to subscribers while `connect`/`disconnect`
//!   is still running, in call order
//! - **settled**: the same payload, delivered after a fixed delay so
//!   immediate-stream reactions elsewhere have had a chance to run
//!
//! Runtime state only - never persisted, rebuilt from scratch every run.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::ConnectionStateChangeEvent;
use crate::event_bus::{EventBus, EventReceiver, EventSender};
use crate::telemetry::{self, TelemetryReporter};

/// Delay before a state change is re-delivered on the settled stream
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(250);

/// A state change waiting for its settled-stream delivery
struct PendingSettle {
    deadline: Instant,
    event: ConnectionStateChangeEvent,
}

/// Registry and notifier for remote provider connections.
///
/// Construct once per process/session and share via `Arc`; collaborators
/// (telemetry, subscribers) are injected rather than reached for
/// ambiently. The registry set is exclusively owned by this service -
/// only [`connect`](Self::connect) and [`disconnect`](Self::disconnect)
/// mutate it.
pub struct ProviderConnectionService {
    /// Currently-connected keys. Runtime state, never persisted.
    connected: RwLock<HashSet<String>>,
    immediate: EventBus,
    settled: EventBus,
    settle_tx: mpsc::UnboundedSender<PendingSettle>,
    settle_delay: Duration,
    telemetry: Arc<dyn TelemetryReporter>,
}

impl ProviderConnectionService {
    /// Create a service with the default settle delay.
    ///
    /// Must be called from within a tokio runtime: the settled-stream
    /// worker task is spawned here.
    pub fn new(telemetry: Arc<dyn TelemetryReporter>) -> Self {
        Self::with_settle_delay(telemetry, DEFAULT_SETTLE_DELAY)
    }

    /// Create a service with a custom settle delay.
    pub fn with_settle_delay(
        telemetry: Arc<dyn TelemetryReporter>,
        settle_delay: Duration,
    ) -> Self {
        let immediate = EventBus::new();
        let settled = EventBus::new();
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        spawn_settle_worker(settle_rx, settled.sender());

        Self {
            connected: RwLock::new(HashSet::new()),
            immediate,
            settled,
            settle_tx,
            settle_delay,
            telemetry,
        }
    }

    /// Mark `key` as connected.
    ///
    /// Complete no-op if the key is already connected: no telemetry, no
    /// events on either stream.
    pub fn connect(&self, key: impl Into<String>) {
        let key = key.into();
        if !self.connected.write().insert(key.clone()) {
            debug!(key = %key, "[Connections] Already connected, ignoring");
            return;
        }

        info!(key = %key, "[Connections] Provider connected");
        self.telemetry
            .send_event(telemetry::CONNECTED_EVENT, telemetry::key_properties(&key));
        self.dispatch(ConnectionStateChangeEvent::connected(key));
    }

    /// Mark `key` as disconnected.
    ///
    /// Fires telemetry and both streams even if the key was never
    /// connected: callers may disconnect a key whose status is uncertain,
    /// and subscribers must still drop any cached assumption about it.
    pub fn disconnect(&self, key: impl Into<String>) {
        let key = key.into();
        self.connected.write().remove(&key);

        info!(key = %key, "[Connections] Provider disconnected");
        self.telemetry.send_event(
            telemetry::DISCONNECTED_EVENT,
            telemetry::key_properties(&key),
        );
        self.dispatch(ConnectionStateChangeEvent::disconnected(key));
    }

    /// Whether `key` is currently connected
    pub fn is_connected(&self, key: &str) -> bool {
        self.connected.read().contains(key)
    }

    /// Whether at least one provider is currently connected
    pub fn has_connections(&self) -> bool {
        !self.connected.read().is_empty()
    }

    /// Snapshot of the currently-connected keys
    pub fn connected_keys(&self) -> Vec<String> {
        self.connected.read().iter().cloned().collect()
    }

    /// Subscribe to the immediate stream.
    ///
    /// Every state change, in call order, enqueued before the triggering
    /// `connect`/`disconnect` returns.
    pub fn subscribe(&self) -> EventReceiver {
        self.immediate.subscribe()
    }

    /// Subscribe to the settled stream.
    ///
    /// The same payloads as the immediate stream, each delivered no
    /// earlier than the settle delay after its triggering call, in call
    /// order. The `reason` is a point-in-time fact - by delivery the
    /// registry may already reflect a later call; use
    /// [`is_connected`](Self::is_connected) for current truth.
    pub fn subscribe_settled(&self) -> EventReceiver {
        self.settled.subscribe()
    }

    fn dispatch(&self, event: ConnectionStateChangeEvent) {
        self.immediate.sender().emit(event.clone());

        let pending = PendingSettle {
            deadline: Instant::now() + self.settle_delay,
            event,
        };
        // The worker outlives every sender; this only fails once the
        // service itself is being torn down.
        let _ = self.settle_tx.send(pending);
    }
}

/// Consume pending settles in FIFO order.
///
/// The settle delay is identical for every entry, so deadlines are
/// monotonic and call order is preserved exactly. A scheduled delivery is
/// never cancelled; it fires even if the key's state has changed again in
/// the meantime.
fn spawn_settle_worker(mut rx: mpsc::UnboundedReceiver<PendingSettle>, sender: EventSender) {
    tokio::spawn(async move {
        while let Some(pending) = rx.recv().await {
            tokio::time::sleep_until(pending.deadline).await;
            sender.emit(pending.event);
        }
        debug!("[Connections] Settle worker stopped");
    });
}
