//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::{EntityTrait, SqlErr, sea_query::OnConflict};
use tracing::info;
use uuid::Uuid;

use super::SeaOrmStorage;
use super::converters::{owner_to_active_model, short_url_to_active_model};
use super::retry;
use crate::errors::{LinklyticsError, Result};
use crate::storage::{NewShortUrl, Owner, ShortUrl};

use migration::entities::{short_url, user};

impl SeaOrmStorage {
    /// 插入新短链接
    ///
    /// 全局唯一性由 alias 唯一索引仲裁：随机别名不做存在性预检，
    /// 并发撞车时恰好一个赢家，输家的约束冲突在这里翻译成 `Conflict`。
    pub async fn insert_short_url(&self, new_url: NewShortUrl) -> Result<ShortUrl> {
        let now = Utc::now();
        let record = ShortUrl {
            id: Uuid::new_v4().to_string(),
            alias: new_url.alias,
            long_url: new_url.long_url,
            topic: new_url.topic,
            owner_id: new_url.owner_id,
            created_at: now,
            updated_at: now,
        };

        let db = &self.db;
        let active_model = short_url_to_active_model(&record);

        let result = retry::with_retry(
            &format!("insert_short_url({})", record.alias),
            self.retry_config,
            || async {
                short_url::Entity::insert(active_model.clone())
                    .exec(db)
                    .await
            },
        )
        .await;

        match result {
            Ok(_) => {
                info!("Short URL created: {} -> {}", record.alias, record.long_url);
                Ok(record)
            }
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(LinklyticsError::conflict(
                    format!("别名已存在: {}", record.alias),
                )),
                _ => Err(LinklyticsError::database_operation(format!(
                    "插入短链接 '{}' 失败: {}",
                    record.alias, e
                ))),
            },
        }
    }

    /// 写入/更新归属者镜像记录（供身份服务边界和测试使用）
    pub async fn upsert_owner(&self, owner: Owner) -> Result<()> {
        let db = &self.db;
        let active_model = owner_to_active_model(&owner);

        retry::with_retry(
            &format!("upsert_owner({})", owner.id),
            self.retry_config,
            || async {
                user::Entity::insert(active_model.clone())
                    .on_conflict(
                        OnConflict::column(user::Column::Id)
                            .update_columns([
                                user::Column::Email,
                                user::Column::Name,
                                user::Column::ProviderId,
                                user::Column::UpdatedAt,
                            ])
                            .to_owned(),
                    )
                    .exec(db)
                    .await
            },
        )
        .await
        .map_err(|e| LinklyticsError::database_operation(format!("Upsert 用户失败: {}", e)))?;

        Ok(())
    }
}
