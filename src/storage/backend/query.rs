//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only, non-aggregating database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use super::converters::{model_to_owner, model_to_short_url};
use super::{SeaOrmStorage, retry};
use crate::errors::{LinklyticsError, Result};
use crate::storage::{Owner, ShortUrl};

use migration::entities::{short_url, user};

impl SeaOrmStorage {
    /// 按别名精确查找
    ///
    /// 解析热路径：读操作带单次超时，存储故障向上传播而不是吞成 None，
    /// 以便调用方区分 NotFound 和存储不可用。
    pub async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrl>> {
        let db = &self.db;
        let alias_owned = alias.to_string();

        let result = retry::with_retry_timeout(
            &format!("find_by_alias({})", alias),
            self.retry_config,
            self.read_timeout_ms,
            || async {
                short_url::Entity::find()
                    .filter(short_url::Column::Alias.eq(&alias_owned))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| LinklyticsError::database_operation(format!("查询短链接失败: {}", e)))?;

        Ok(result.map(model_to_short_url))
    }

    /// 别名是否已被占用
    pub async fn alias_exists(&self, alias: &str) -> Result<bool> {
        let db = &self.db;
        let alias_owned = alias.to_string();

        let count = retry::with_retry(
            &format!("alias_exists({})", alias),
            self.retry_config,
            || async {
                short_url::Entity::find()
                    .filter(short_url::Column::Alias.eq(&alias_owned))
                    .count(db)
                    .await
            },
        )
        .await
        .map_err(|e| LinklyticsError::database_operation(format!("查询别名占用失败: {}", e)))?;

        Ok(count > 0)
    }

    /// 某归属者名下的链接列表（按创建时间倒序）
    pub async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ShortUrl>> {
        let db = &self.db;
        let owner_owned = owner_id.to_string();

        let models = retry::with_retry("list_for_owner", self.retry_config, || async {
            short_url::Entity::find()
                .filter(short_url::Column::UserId.eq(&owner_owned))
                .order_by_desc(short_url::Column::CreatedAt)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinklyticsError::database_operation(format!("查询链接列表失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_short_url).collect())
    }

    /// 查找归属者
    pub async fn find_owner(&self, owner_id: &str) -> Result<Option<Owner>> {
        let db = &self.db;
        let owner_owned = owner_id.to_string();

        let result = retry::with_retry("find_owner", self.retry_config, || async {
            user::Entity::find_by_id(&owner_owned).one(db).await
        })
        .await
        .map_err(|e| LinklyticsError::database_operation(format!("查询用户失败: {}", e)))?;

        Ok(result.map(model_to_owner))
    }
}
