use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;

/// 缓存条目：值和它自己的存活时间
#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// 按条目读取 TTL，会话和重置令牌的有效期不同
struct PerEntryExpiry;

impl Expiry<String, Entry> for PerEntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
    default_ttl: u64,
}

impl Default for MokaCacheWrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheWrapper {
    pub fn new() -> Self {
        let config = AppConfig::get();
        Self::with_settings(config.cache.memory.max_capacity, config.cache.default_ttl)
    }

    pub fn with_settings(max_capacity: u64, default_ttl: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, default TTL: {}s",
            max_capacity, default_ttl
        );
        Self { inner, default_ttl }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some(entry) = self.inner.get(key).await {
            debug!("Successfully retrieved key: {}", key);
            CacheResult::Found(entry.value)
        } else {
            debug!("Key not found in cache: {}", key);
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let effective_ttl = if ttl == 0 { self.default_ttl } else { ttl };
        let entry = Entry {
            value,
            ttl: Duration::from_secs(effective_ttl),
        };
        self.inner.insert(key, entry).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::with_settings(100, 60);
        cache
            .insert_raw("session:abc".to_string(), "{}".to_string(), 0)
            .await;
        assert_eq!(
            cache.get_raw("session:abc").await,
            CacheResult::Found("{}".to_string())
        );

        cache.remove("session:abc").await;
        assert_eq!(cache.get_raw("session:abc").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_per_entry_ttl_expires() {
        let cache = MokaCacheWrapper::with_settings(100, 60);
        cache
            .insert_raw("password_reset:t".to_string(), "1".to_string(), 1)
            .await;
        assert!(cache.get_raw("password_reset:t").await.found().is_some());

        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(
            cache.get_raw("password_reset:t").await,
            CacheResult::NotFound
        );
    }
}
