//! # agora-api
//!
//! HTTP API layer for Agora built on Axum.
//!
//! The engine is an internal service boundary: identity arrives as
//! headers set by the authenticating front end, DTOs mirror the service
//! types, and the error mapping translates the domain taxonomy into
//! status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
