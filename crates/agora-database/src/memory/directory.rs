//! In-memory user directory.

use async_trait::async_trait;
use dashmap::DashMap;

use agora_core::result::AppResult;
use agora_core::traits::directory::IdentityDirectory;
use agora_core::types::id::UserId;

/// Dashmap-backed directory of display tags.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    tags: DashMap<UserId, String>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a user's display tag.
    pub fn register(&self, user: UserId, tag: impl Into<String>) {
        self.tags.insert(user, tag.into());
    }
}

#[async_trait]
impl IdentityDirectory for MemoryDirectory {
    async fn display_tag(&self, user: UserId) -> AppResult<Option<String>> {
        Ok(self.tags.get(&user).map(|tag| tag.clone()))
    }
}
