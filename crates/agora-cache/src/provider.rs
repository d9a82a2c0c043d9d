//! Cache manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use agora_core::config::cache::CacheConfig;
use agora_core::error::AppError;
use agora_core::result::AppResult;
use agora_core::traits::cache::CacheProvider;

/// Cache manager that wraps the configured cache provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// The inner cache provider.
    inner: Arc<dyn CacheProvider>,
}

impl CacheManager {
    /// Create a new cache manager from configuration.
    pub fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn CacheProvider> = match config.provider.as_str() {
            "memory" => {
                info!("Initializing in-memory cache provider");
                Arc::new(crate::memory::MemoryCacheProvider::new(
                    &config.memory,
                    config.default_ttl_seconds,
                ))
            }
            "disabled" => {
                info!("Cache disabled; all reads will miss");
                Arc::new(NullCacheProvider)
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider '{other}'. Expected 'memory' or 'disabled'"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Wrap an existing provider, mainly for tests.
    pub fn from_provider(inner: Arc<dyn CacheProvider>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set_default(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.inner.flush_all().await
    }
}

/// Provider used when caching is disabled: every read misses and every
/// write is a no-op, so callers always recompute from the stores.
#[derive(Debug, Clone, Copy)]
struct NullCacheProvider;

#[async_trait]
impl CacheProvider for NullCacheProvider {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
        Ok(())
    }

    async fn set_default(&self, _key: &str, _value: &str) -> AppResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Ok(())
    }

    async fn exists(&self, _key: &str) -> AppResult<bool> {
        Ok(false)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::config::cache::CacheConfig;

    #[tokio::test]
    async fn test_disabled_provider_always_misses() {
        let config = CacheConfig {
            provider: "disabled".to_string(),
            ..Default::default()
        };
        let cache = CacheManager::new(&config).unwrap();

        cache.set_default("k", "v").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(!cache.exists("k").await.unwrap());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let config = CacheConfig {
            provider: "redis".to_string(),
            ..Default::default()
        };
        assert!(CacheManager::new(&config).is_err());
    }
}
