use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, trace};

use crate::cache::{CacheResult, ObjectCache};
use crate::errors::LinklyticsError;
use crate::storage::ShortUrl;

/// Redis 对象缓存
///
/// 值为 ShortUrl 的 JSON 快照，带固定 TTL。读写错误只记日志并按
/// 未命中处理，缓存故障由存储层兜底。
pub struct RedisObjectCache {
    client: redis::Client,
    /// 持久化连接，使用 RwLock 保护
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    key_prefix: String,
    ttl: u64,
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, LinklyticsError> {
        let config = crate::config::get_config();
        let redis_config = &config.cache.redis;

        let ttl = config.cache.default_ttl;

        debug!(
            "RedisObjectCache created with prefix: '{}', TTL: {}s",
            redis_config.key_prefix, ttl
        );

        let client = redis::Client::open(redis_config.url.clone()).map_err(|e| {
            LinklyticsError::cache_connection(format!(
                "Failed to create Redis client for '{}': {}",
                redis_config.url, e
            ))
        })?;

        Ok(Self {
            client,
            connection: Arc::new(RwLock::new(None)),
            key_prefix: redis_config.key_prefix.clone(),
            ttl,
        })
    }

    /// 获取或建立持久连接
    // TODO: 改用 redis ConnectionManager，替掉手写的断线重建
    async fn get_connection(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        // 首先尝试读取现有连接
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        // 需要建立新连接
        let mut conn_guard = self.connection.write().await;

        // 双重检查，避免竞态条件
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self.client.get_multiplexed_async_connection().await?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established and cached");

        Ok(new_conn)
    }

    /// 重置连接（在连接错误时调用）
    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }

    fn make_key(&self, alias: &str) -> String {
        format!("{}{}", self.key_prefix, alias)
    }

    fn serialize_record(record: &ShortUrl) -> Result<String, serde_json::Error> {
        serde_json::to_string(record)
    }

    fn deserialize_record(data: &str) -> Result<ShortUrl, serde_json::Error> {
        serde_json::from_str(data)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get(&self, alias: &str) -> CacheResult {
        let redis_key = self.make_key(alias);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return CacheResult::Miss;
            }
        };

        let result: redis::RedisResult<Option<String>> = conn.get(&redis_key).await;

        match result {
            Ok(Some(data)) => match Self::deserialize_record(&data) {
                Ok(record) => {
                    trace!("Cache hit for alias: {}", alias);
                    CacheResult::Found(record)
                }
                Err(e) => {
                    error!("Failed to deserialize ShortUrl for alias '{}': {}", alias, e);
                    CacheResult::Miss
                }
            },
            Ok(None) => {
                trace!("Cache miss for alias: {}", alias);
                CacheResult::Miss
            }
            Err(e) => {
                // 连接可能已断开，重置连接；错误按强制未命中处理
                error!("Failed to get alias '{}': {}", alias, e);
                self.reset_connection().await;
                CacheResult::Miss
            }
        }
    }

    async fn insert(&self, alias: &str, value: ShortUrl) {
        let redis_key = self.make_key(alias);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return;
            }
        };

        match Self::serialize_record(&value) {
            Ok(serialized_value) => {
                match conn
                    .set_ex::<String, String, ()>(redis_key, serialized_value, self.ttl)
                    .await
                {
                    Ok(_) => {
                        trace!("Cached alias: {}", alias);
                    }
                    Err(e) => {
                        error!("Failed to cache alias '{}': {}", alias, e);
                        self.reset_connection().await;
                    }
                }
            }
            Err(e) => {
                error!("Failed to serialize ShortUrl for alias '{}': {}", alias, e);
            }
        }
    }
}
