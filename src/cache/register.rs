use crate::cache::ObjectCache;
use crate::cache::object_cache::{moka::MokaCacheWrapper, redis::RedisObjectCache};
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, Once, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static BUILTIN_PLUGINS: Once = Once::new();

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    let name = name.into();
    let mut registry = OBJECT_CACHE_REGISTRY
        .write()
        .expect("Cache registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    OBJECT_CACHE_REGISTRY
        .read()
        .expect("Cache registry lock poisoned")
        .get(name)
        .cloned()
}

async fn build_moka() -> Result<Box<dyn ObjectCache>> {
    Ok(Box::new(MokaCacheWrapper::new()))
}

async fn build_redis() -> Result<Box<dyn ObjectCache>> {
    let cache = RedisObjectCache::connect().await?;
    Ok(Box::new(cache))
}

fn moka_constructor() -> BoxedObjectCacheFuture {
    Box::pin(build_moka())
}

fn redis_constructor() -> BoxedObjectCacheFuture {
    Box::pin(build_redis())
}

/// 注册内置的缓存后端，重复调用无副作用
pub fn register_builtin_plugins() {
    BUILTIN_PLUGINS.call_once(|| {
        register_object_cache_plugin("moka", Arc::new(moka_constructor));
        register_object_cache_plugin("redis", Arc::new(redis_constructor));
    });
}

pub fn debug_object_cache_registry() {
    let registry = OBJECT_CACHE_REGISTRY
        .read()
        .expect("Cache registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No object cache plugins registered.");
    } else {
        tracing::debug!("Registered object cache plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_plugins_are_registered() {
        register_builtin_plugins();
        register_builtin_plugins();
        assert!(get_object_cache_plugin("moka").is_some());
        assert!(get_object_cache_plugin("redis").is_some());
        assert!(get_object_cache_plugin("memcached").is_none());
    }
}
