//! # agora-service
//!
//! Business logic service layer for Agora. [`presence::PresenceService`]
//! aggregates heartbeat records into "who is browsing here" views;
//! [`subscription::SubscriptionService`] drives the subscription
//! lifecycle and keeps the cached unseen aggregate coherent.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod presence;
pub mod subscription;

pub use context::{RequestContext, Requester};
pub use presence::{PresenceService, PresenceSnapshot};
pub use subscription::SubscriptionService;
