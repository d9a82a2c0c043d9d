//! # agora-entity
//!
//! Domain models for the Agora presence and subscription engine, plus
//! the store traits through which services reach them. Each store trait
//! lives next to the records it owns; infrastructure crates provide the
//! PostgreSQL and in-memory implementations.

pub mod activity;
pub mod subscription;

pub use activity::{ActivityRecord, ActivitySubject, ActivityStore, SubjectKey};
pub use subscription::{BatchRemoval, SeenState, SubscriptionRecord, SubscriptionStore};
