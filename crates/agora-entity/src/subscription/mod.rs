//! Thread subscription records and their store contract.

pub mod batch;
pub mod model;
pub mod store;

pub use batch::BatchRemoval;
pub use model::{SeenState, SubscriptionRecord};
pub use store::SubscriptionStore;
