//! Presence aggregation over heartbeat records.

pub mod service;

pub use service::{PresenceService, PresenceSnapshot};
