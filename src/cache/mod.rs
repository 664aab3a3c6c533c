//! 对象缓存
//!
//! 会话、密码重置令牌等短期数据保存在这里。后端通过注册表按名称选择
//! （`moka` 内存缓存或 `redis`）。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错，无法判断键是否存在
    ExistsButNoValue,
}

impl<T> CacheResult<T> {
    pub fn found(self) -> Option<T> {
        match self {
            CacheResult::Found(value) => Some(value),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// 写入一个键，`ttl` 单位为秒，0 表示使用默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}

impl<'a> dyn ObjectCache + 'a {
    /// 读取并反序列化 JSON 值，损坏的值视为不存在
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key).await.found()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding undecodable cache entry '{}': {}", key, e);
                self.remove(key).await;
                None
            }
        }
    }

    /// 序列化为 JSON 后写入
    pub async fn insert_json<T: Serialize + ?Sized>(
        &self,
        key: impl Into<String>,
        value: &T,
        ttl: u64,
    ) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.insert_raw(key.into(), raw, ttl).await;
        Ok(())
    }
}

/// 根据配置创建对象缓存
pub async fn create_object_cache() -> Result<Arc<dyn ObjectCache>> {
    register::register_builtin_plugins();
    register::debug_object_cache_registry();

    let config = AppConfig::get();
    let cache_type = config.cache.cache_type.as_str();
    let constructor = register::get_object_cache_plugin(cache_type).ok_or_else(|| {
        PortalError::cache_plugin_not_found(format!("Unknown cache type: {cache_type}"))
    })?;

    let cache = constructor().await?;
    debug!("Object cache '{}' ready", cache_type);
    Ok(Arc::from(cache))
}

#[cfg(test)]
mod tests {
    use super::object_cache::moka::MokaCacheWrapper;
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Probe {
        id: i64,
        name: String,
    }

    #[tokio::test]
    async fn test_json_helpers_round_trip_through_cache() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        let probe = Probe {
            id: 7,
            name: "Amina".to_string(),
        };
        cache.insert_json("probe:7", &probe, 0).await.unwrap();

        let loaded: Option<Probe> = cache.get_json("probe:7").await;
        assert_eq!(loaded, Some(probe));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_dropped() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        cache
            .insert_raw("probe:bad".to_string(), "not json".to_string(), 0)
            .await;

        let loaded: Option<Probe> = cache.get_json("probe:bad").await;
        assert!(loaded.is_none());
        assert_eq!(cache.get_raw("probe:bad").await, CacheResult::NotFound);
    }
}
