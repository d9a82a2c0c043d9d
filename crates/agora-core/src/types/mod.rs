//! Shared type definitions: typed identifiers, pagination, and
//! presence query parameters.

pub mod id;
pub mod pagination;
pub mod query;

pub use id::{SessionId, ThreadId, UserId};
pub use pagination::{PageRequest, PageResponse};
pub use query::PresenceQuery;
