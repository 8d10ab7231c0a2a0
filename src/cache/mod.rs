use std::sync::Arc;

use crate::errors::Result;

pub mod memory;
pub mod null;
pub mod redis;
pub mod traits;

pub use memory::MokaObjectCache;
pub use null::NullObjectCache;
pub use redis::RedisObjectCache;
pub use traits::{CacheResult, ObjectCache};

pub struct CacheFactory;

impl CacheFactory {
    /// 根据配置的 cache.type 创建缓存实例
    pub async fn create() -> Result<Arc<dyn ObjectCache>> {
        let config = crate::config::get_config();

        match config.cache.cache_type.as_str() {
            "redis" => Ok(Arc::new(RedisObjectCache::new()?)),
            "memory" => Ok(Arc::new(MokaObjectCache::new())),
            _ => Ok(Arc::new(NullObjectCache::new())),
        }
    }
}
