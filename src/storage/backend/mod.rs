//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::analytics::ClickSink;
use crate::errors::{LinklyticsError, Result};
use crate::storage::{AliasStore, NewShortUrl, Owner, OwnerStore, ShortUrl};

mod analytics;
mod click_sink;
mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

pub use analytics::{AliasClicksRow, BreakdownRow, ClickTotalsRow, DailyClicksRow};
pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LinklyticsError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// 重试配置
    retry_config: retry::RetryConfig,
    /// 单次读操作超时（毫秒）
    read_timeout_ms: u64,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(LinklyticsError::database_config(
                "DATABASE_URL 未设置".to_string(),
            ));
        }

        // 读取重试配置
        let config = crate::config::get_config();
        let retry_config = retry::RetryConfig {
            max_retries: config.database.retry_count,
            base_delay_ms: config.database.retry_base_delay_ms,
            max_delay_ms: config.database.retry_max_delay_ms,
        };

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
            read_timeout_ms: config.database.timeout * 1000,
        };

        // 运行迁移
        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn get_backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn as_click_sink(&self) -> Arc<dyn ClickSink> {
        Arc::new(self.clone()) as Arc<dyn ClickSink>
    }

    /// 获取数据库连接（用于测试等需要直接访问数据库的场景）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

// 窄接口委托给 mutations.rs / query.rs 里的固有方法
#[async_trait]
impl AliasStore for SeaOrmStorage {
    async fn insert_short_url(&self, new_url: NewShortUrl) -> Result<ShortUrl> {
        SeaOrmStorage::insert_short_url(self, new_url).await
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrl>> {
        SeaOrmStorage::find_by_alias(self, alias).await
    }

    async fn alias_exists(&self, alias: &str) -> Result<bool> {
        SeaOrmStorage::alias_exists(self, alias).await
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ShortUrl>> {
        SeaOrmStorage::list_for_owner(self, owner_id).await
    }
}

#[async_trait]
impl OwnerStore for SeaOrmStorage {
    async fn find_owner(&self, owner_id: &str) -> Result<Option<Owner>> {
        SeaOrmStorage::find_owner(self, owner_id).await
    }

    async fn upsert_owner(&self, owner: Owner) -> Result<()> {
        SeaOrmStorage::upsert_owner(self, owner).await
    }
}
