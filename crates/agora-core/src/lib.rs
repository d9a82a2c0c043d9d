//! # agora-core
//!
//! Core crate for the Agora presence and subscription engine. Contains
//! the cache and directory seam traits, configuration schemas, typed
//! identifiers, query parameter types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Agora crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
