//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use capture_core::config::cache::MemoryCacheConfig;
use capture_core::result::AppResult;
use capture_core::traits::cache::CacheProvider;

/// In-memory cache provider using moka.
///
/// TTL is enforced at the cache level (set at construction time); the
/// per-call `ttl` argument is accepted for interface parity with an
/// external backend.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, String>,
    /// Default TTL for entries.
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> AppResult<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.cache.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        let config = MemoryCacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 60,
        };
        MemoryCacheProvider::new(&config, 60)
    }

    #[tokio::test]
    async fn set_then_get() {
        let provider = make_provider();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            provider.get("key1").await.unwrap(),
            Some("value1".to_string())
        );
    }

    #[tokio::test]
    async fn delete_removes_the_key() {
        let provider = make_provider();
        provider.set_default("key1", "value1").await.unwrap();
        provider.delete("key1").await.unwrap();
        assert_eq!(provider.get("key1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn flush_all_clears_everything() {
        let provider = make_provider();
        provider.set_default("a", "1").await.unwrap();
        provider.set_default("b", "2").await.unwrap();
        provider.flush_all().await.unwrap();
        assert_eq!(provider.get("a").await.unwrap(), None);
        assert_eq!(provider.get("b").await.unwrap(), None);
    }
}
