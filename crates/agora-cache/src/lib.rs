//! # agora-cache
//!
//! Cache provider implementations for Agora:
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//! - **disabled**: A null provider that always misses
//!
//! The provider is selected at runtime based on configuration. The cache
//! holds only derived, recomputable views (per-user unseen-subscription
//! flags), so running with the cache disabled is always correct, just
//! slower.

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
