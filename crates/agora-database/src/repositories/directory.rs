//! User directory repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use agora_core::error::{AppError, ErrorKind};
use agora_core::result::AppResult;
use agora_core::traits::directory::IdentityDirectory;
use agora_core::types::id::UserId;

/// PostgreSQL-backed user directory.
///
/// Display tags are owned by the identity collaborator; this repository
/// only reads the `users` table it maintains.
#[derive(Debug, Clone)]
pub struct UserDirectoryRepository {
    pool: PgPool,
}

impl UserDirectoryRepository {
    /// Create a new directory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityDirectory for UserDirectoryRepository {
    async fn display_tag(&self, user: UserId) -> AppResult<Option<String>> {
        sqlx::query_scalar("SELECT display_tag FROM users WHERE id = $1")
            .bind(user)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch display tag", e)
            })
    }
}
