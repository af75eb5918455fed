//! Connection state change events
//!
//! Emitted on every provider connection transition and consumed by both
//! notification streams. An event records what happened at the moment of
//! the triggering call - it is not a live view of the registry.

use serde::{Deserialize, Serialize};

/// Why a connection state change was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionReason {
    /// The key was connected for the first time
    Connected,
    /// The key was disconnected (it may never have been connected)
    Disconnected,
}

impl ConnectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }

    /// Whether this reason reports the key as connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// A single provider connection state transition.
///
/// Settled-stream consumers must treat `reason` as a point-in-time
/// notification: by the time the event is delivered the registry may
/// already reflect a later call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStateChangeEvent {
    /// Opaque caller-supplied key naming one provider connection,
    /// e.g. `"github|account123"`. Never validated.
    pub key: String,
    pub reason: ConnectionReason,
}

impl ConnectionStateChangeEvent {
    pub fn connected(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: ConnectionReason::Connected,
        }
    }

    pub fn disconnected(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: ConnectionReason::Disconnected,
        }
    }
}
