//! Heartbeat activity records and their store contract.

pub mod model;
pub mod store;

pub use model::{ActivityRecord, ActivitySubject, SubjectKey};
pub use store::ActivityStore;
