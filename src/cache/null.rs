use async_trait::async_trait;
use tracing::trace;

use crate::cache::{CacheResult, ObjectCache};
use crate::storage::ShortUrl;

/// 空缓存实现：所有查询都未命中，解析始终走存储
pub struct NullObjectCache;

impl NullObjectCache {
    pub fn new() -> Self {
        trace!("Using NullObjectCache: resolution always hits storage");
        NullObjectCache
    }
}

impl Default for NullObjectCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectCache for NullObjectCache {
    async fn get(&self, _alias: &str) -> CacheResult {
        CacheResult::Miss
    }

    async fn insert(&self, _alias: &str, _value: ShortUrl) {}
}
