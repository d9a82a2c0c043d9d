//! Capability traits implemented by infrastructure crates.
//!
//! The store traits for activity and subscription records live next to
//! their entity models in `agora-entity`; the traits here depend only on
//! core types.

pub mod cache;
pub mod directory;

pub use cache::CacheProvider;
pub use directory::IdentityDirectory;
