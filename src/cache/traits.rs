use async_trait::async_trait;

use crate::storage::ShortUrl;

/// 缓存查询结果
///
/// 缓存是 advisory 的：实现内部把 I/O 错误降级为 Miss（记日志），
/// 缓存不可用绝不能让解析失败。
#[derive(Debug, Clone)]
pub enum CacheResult {
    /// 成功获取到缓存值
    Found(ShortUrl),
    /// 未命中（包括缓存故障造成的强制未命中）
    Miss,
}

/// 别名映射不可变，创建后也没有删除路径，所以接口只有读和回填，
/// 没有失效操作——过期完全交给 TTL。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get(&self, alias: &str) -> CacheResult;

    /// 写入缓存，TTL 由实现从配置读取；写入失败静默（快照可由下次未命中重建）
    async fn insert(&self, alias: &str, value: ShortUrl);
}
