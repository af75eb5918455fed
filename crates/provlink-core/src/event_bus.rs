//! Event bus - broadcast distribution of connection state changes
//!
//! Both notification streams (immediate and settled) are instances of this
//! bus. Producers emit through an [`EventSender`]; each consumer subscribes
//! with its own [`EventReceiver`] and receives every event emitted after
//! subscription. Unsubscribing is dropping the receiver.
//!
//! Emitting with zero subscribers is defined behavior, not an error.

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::ConnectionStateChangeEvent;

/// Default channel capacity for a stream
const DEFAULT_CAPACITY: usize = 256;

/// One notification stream backed by a broadcast channel.
///
/// Each subscriber gets its own copy of every event.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ConnectionStateChangeEvent>,
}

impl EventBus {
    /// Create a new bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new bus with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Get a sender for emitting events
    ///
    /// The sender can be cloned and shared across threads/tasks.
    pub fn sender(&self) -> EventSender {
        EventSender::new(self.sender.clone())
    }

    /// Subscribe to receive events
    ///
    /// The receiver sees every event emitted after this call.
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe())
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Emitting half of a stream.
///
/// Thread-safe and cheaply cloneable.
#[derive(Clone)]
pub struct EventSender {
    sender: broadcast::Sender<ConnectionStateChangeEvent>,
}

impl EventSender {
    fn new(sender: broadcast::Sender<ConnectionStateChangeEvent>) -> Self {
        Self { sender }
    }

    /// Emit a state change.
    ///
    /// Returns the number of receivers that received the event.
    /// Returns 0 if there are no subscribers (not an error).
    pub fn emit(&self, event: ConnectionStateChangeEvent) -> usize {
        let key = event.key.clone();
        let reason = event.reason;
        match self.sender.send(event) {
            Ok(count) => {
                debug!(
                    key = %key,
                    reason = reason.as_str(),
                    receivers = count,
                    "[EventBus] Emitted state change"
                );
                count
            }
            Err(_) => {
                // No receivers - just means no one is listening yet
                debug!(
                    key = %key,
                    reason = reason.as_str(),
                    "[EventBus] No receivers for state change"
                );
                0
            }
        }
    }

    /// Check if there are any subscribers
    pub fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

/// Receiving half of a stream.
///
/// Events arrive in emit order. A receiver that falls behind the channel
/// capacity skips the gap with a warning and continues.
pub struct EventReceiver {
    receiver: broadcast::Receiver<ConnectionStateChangeEvent>,
}

impl EventReceiver {
    fn new(receiver: broadcast::Receiver<ConnectionStateChangeEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event (async)
    ///
    /// Returns `None` once the stream is closed.
    pub async fn recv(&mut self) -> Option<ConnectionStateChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        skipped_events = skipped,
                        "[EventBus] Receiver lagged, skipped {} events", skipped
                    );
                    // Continue to receive next available event
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("[EventBus] Stream closed");
                    return None;
                }
            }
        }
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Option<ConnectionStateChangeEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(
                    skipped_events = skipped,
                    "[EventBus] Receiver lagged on try_recv"
                );
                self.receiver.try_recv().ok()
            }
            Err(_) => None,
        }
    }
}
