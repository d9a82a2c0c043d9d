//! Subscription lifecycle and the cached unseen aggregate.

pub mod service;

pub use service::SubscriptionService;
