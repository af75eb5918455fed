//! Connection tracking service
//!
//! The single service object folding together the connection registry,
//! both notification streams, and telemetry emission.

mod provider_connections;

pub use provider_connections::{ProviderConnectionService, DEFAULT_SETTLE_DELAY};
