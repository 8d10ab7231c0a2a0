//! Alias resolution service (cache-aside)

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::analytics::{ClickRecorder, ClientContext};
use crate::cache::{CacheResult, ObjectCache};
use crate::errors::{LinklyticsError, Result};
use crate::storage::AliasStore;

/// 别名解析服务
///
/// 读路径：缓存 → 存储 → 回填缓存。两级读是独立可失败的串行阶段：
/// 缓存故障降级为未命中（在缓存实现内处理），存储故障向上传播。
/// 每次成功解析触发一次异步点击记录，不阻塞调用方。
pub struct ResolverService {
    store: Arc<dyn AliasStore>,
    cache: Arc<dyn ObjectCache>,
    recorder: Arc<ClickRecorder>,
}

impl ResolverService {
    pub fn new(
        store: Arc<dyn AliasStore>,
        cache: Arc<dyn ObjectCache>,
        recorder: Arc<ClickRecorder>,
    ) -> Self {
        Self {
            store,
            cache,
            recorder,
        }
    }

    /// 解析别名为长 URL
    ///
    /// 未分配的别名返回 `NotFound`（业务结果）；存储读故障返回
    /// 对应的数据库错误。
    #[instrument(skip(self, ctx), fields(alias = %alias))]
    pub async fn resolve(&self, alias: &str, ctx: &ClientContext) -> Result<String> {
        if let CacheResult::Found(record) = self.cache.get(alias).await {
            debug!("Cache hit for alias: {}", alias);
            self.recorder.record(&record.id, ctx);
            return Ok(record.long_url);
        }

        let record = self
            .store
            .find_by_alias(alias)
            .await?
            .ok_or_else(|| {
                warn!("Alias not found: {}", alias);
                LinklyticsError::not_found(format!("Invalid alias: {}", alias))
            })?;

        self.recorder.record(&record.id, ctx);

        // 回填缓存，后续请求在 TTL 内不再读存储。
        // 并发回填是 last-writer-wins：缓存值是不可变映射的快照，无害。
        self.cache.insert(alias, record.clone()).await;

        debug!("Alias resolved and cached: {}", alias);
        Ok(record.long_url)
    }
}
