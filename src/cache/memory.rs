use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::storage::ShortUrl;

/// 进程内对象缓存（moka）
///
/// 单实例部署或测试时替代 Redis，走同一个 ObjectCache 接口。
pub struct MokaObjectCache {
    inner: Cache<String, ShortUrl>,
}

impl MokaObjectCache {
    pub fn new() -> Self {
        let config = crate::config::get_config();
        let default_ttl = Duration::from_secs(config.cache.default_ttl);

        let inner = Cache::builder()
            .max_capacity(config.cache.memory.max_capacity)
            .time_to_live(default_ttl)
            .build();

        debug!(
            "MokaObjectCache initialized with max capacity: {}, TTL: {}s",
            config.cache.memory.max_capacity, config.cache.default_ttl
        );
        Self { inner }
    }
}

impl Default for MokaObjectCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectCache for MokaObjectCache {
    async fn get(&self, alias: &str) -> CacheResult {
        if let Some(value) = self.inner.get(alias).await {
            CacheResult::Found(value)
        } else {
            CacheResult::Miss
        }
    }

    async fn insert(&self, alias: &str, value: ShortUrl) {
        self.inner.insert(alias.to_string(), value).await;
    }
}
