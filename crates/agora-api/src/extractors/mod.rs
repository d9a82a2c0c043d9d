//! Custom Axum extractors.

pub mod identity;
pub mod pagination;

pub use identity::RequesterIdentity;
pub use pagination::PaginationParams;
