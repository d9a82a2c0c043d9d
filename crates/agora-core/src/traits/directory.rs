//! Identity directory trait, the seam to the identity collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UserId;

/// Resolves user identifiers to opaque display tags.
///
/// The presence aggregator renders named viewers as display tags; what a
/// tag looks like is owned by the identity collaborator, not this engine.
#[async_trait]
pub trait IdentityDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Look up the display tag for a single user. `None` when the user
    /// is unknown to the directory.
    async fn display_tag(&self, user: UserId) -> AppResult<Option<String>>;

    /// Batch lookup preserving input order. Unknown users yield `None`
    /// at their position.
    async fn display_tags(&self, users: &[UserId]) -> AppResult<Vec<Option<String>>> {
        let mut tags = Vec::with_capacity(users.len());
        for user in users {
            tags.push(self.display_tag(*user).await?);
        }
        Ok(tags)
    }
}
