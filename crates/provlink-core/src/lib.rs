//! # Provlink Core
//!
//! Remote provider connection state tracking and notification.
//!
//! A [`ProviderConnectionService`] owns the in-memory registry of
//! currently-connected provider keys, publishes every state change on two
//! broadcast streams (immediate and settled), and reports each transition
//! to an injected telemetry collaborator.
//!
//! ## Modules
//!
//! - `domain` - Connection state change events
//! - `event_bus` - Broadcast pub/sub backing both notification streams
//! - `service` - The connection registry and notifier
//! - `telemetry` - Fire-and-forget telemetry reporting

pub mod domain;
pub mod event_bus;
pub mod service;
pub mod telemetry;

// Re-export commonly used types
pub use domain::{ConnectionReason, ConnectionStateChangeEvent};
pub use event_bus::{EventBus, EventReceiver, EventSender};
pub use service::{ProviderConnectionService, DEFAULT_SETTLE_DELAY};
pub use telemetry::{LogTelemetryReporter, TelemetryReporter};
