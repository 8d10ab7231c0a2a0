//! Link allocation service
//!
//! Creates short URLs for an already-authenticated owner and lists an
//! owner's links. Alias uniqueness is arbitrated by the store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::{LinklyticsError, Result};
use crate::storage::{AliasStore, NewShortUrl};
use crate::utils::url_validator::validate_url;
use crate::utils::{generate_random_alias, is_valid_alias, short_url_path};

// ============ Request/Response DTOs ============

/// Request to create a new short URL
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Target long URL
    pub long_url: String,
    /// Alias (optional, will be generated if not provided)
    pub custom_alias: Option<String>,
    /// Grouping label for analytics filtering
    pub topic: Option<String>,
}

/// Result of link creation
#[derive(Debug, Clone, Serialize)]
pub struct LinkCreateResult {
    /// 完整短链接路径（`<base_url>/shorten/<alias>`）
    pub short_url: String,
    pub alias: String,
    pub created_at: DateTime<Utc>,
    /// Whether the alias was auto-generated
    pub generated_alias: bool,
}

/// Owner-facing link listing entry
#[derive(Debug, Clone, Serialize)]
pub struct LinkSummary {
    pub short_url: String,
    pub long_url: String,
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct LinkService {
    store: Arc<dyn AliasStore>,
    base_url: String,
    random_alias_length: usize,
}

impl LinkService {
    pub fn new(store: Arc<dyn AliasStore>) -> Self {
        let config = crate::config::get_config();
        Self {
            store,
            base_url: config.server.base_url.clone(),
            random_alias_length: config.features.random_alias_length,
        }
    }

    /// 创建短链接
    ///
    /// 自定义别名：先做存在性检查，占用即 `Conflict`，不重试不改名。
    /// 随机别名：直接插入，不做预检——并发撞上唯一约束时由存储层
    /// 翻译成同一个 `Conflict`。创建时不写缓存，首次解析时惰性填充。
    pub async fn create_link(
        &self,
        request: CreateLinkRequest,
        owner_id: &str,
    ) -> Result<LinkCreateResult> {
        validate_url(&request.long_url)
            .map_err(|e| LinklyticsError::validation(e.to_string()))?;

        let (alias, generated_alias) = match request.custom_alias {
            Some(alias) if !alias.is_empty() => {
                if !is_valid_alias(&alias) {
                    return Err(LinklyticsError::validation(format!(
                        "别名格式无效: '{}'（仅限字母数字和 _ -，最长 64 位）",
                        alias
                    )));
                }
                if self.store.alias_exists(&alias).await? {
                    return Err(LinklyticsError::conflict(format!("别名已存在: {}", alias)));
                }
                (alias, false)
            }
            _ => (generate_random_alias(self.random_alias_length), true),
        };

        let record = self
            .store
            .insert_short_url(NewShortUrl {
                alias,
                long_url: request.long_url,
                topic: request.topic,
                owner_id: owner_id.to_string(),
            })
            .await?;

        info!(
            "Link created for owner {}: {} (generated: {})",
            owner_id, record.alias, generated_alias
        );

        Ok(LinkCreateResult {
            short_url: short_url_path(&self.base_url, &record.alias),
            alias: record.alias,
            created_at: record.created_at,
            generated_alias,
        })
    }

    /// 某归属者名下的链接列表
    pub async fn list_links(&self, owner_id: &str) -> Result<Vec<LinkSummary>> {
        let records = self.store.list_for_owner(owner_id).await?;

        Ok(records
            .into_iter()
            .map(|record| LinkSummary {
                short_url: short_url_path(&self.base_url, &record.alias),
                long_url: record.long_url,
                topic: record.topic,
                created_at: record.created_at,
            })
            .collect())
    }
}
