//! In-memory store implementations backed by dashmap.
//!
//! These implement the same traits as the PostgreSQL repositories and
//! carry the same semantics; they back tests and single-node setups.

pub mod activity;
pub mod directory;
pub mod subscription;

pub use activity::MemoryActivityStore;
pub use directory::MemoryDirectory;
pub use subscription::MemorySubscriptionStore;
