use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{NewShortUrl, Owner, ShortUrl};

/// 别名存储访问接口
///
/// 分配器和解析器只依赖这几个操作；全局唯一性由底层存储的唯一约束保证，
/// `insert_short_url` 负责把约束冲突翻译为 `Conflict`。
#[async_trait]
pub trait AliasStore: Send + Sync {
    /// 插入新短链接；别名撞上唯一约束时返回 `Conflict`
    async fn insert_short_url(&self, new_url: NewShortUrl) -> Result<ShortUrl>;

    /// 按别名精确查找
    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrl>>;

    /// 别名是否已被占用（自定义别名预检）
    async fn alias_exists(&self, alias: &str) -> Result<bool>;

    /// 某归属者名下的链接列表
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ShortUrl>>;
}

/// 归属者目录
///
/// 用户生命周期归外部身份服务所有；核心只读取归属关系。
/// `upsert_owner` 供身份服务边界（及测试）写入镜像记录。
#[async_trait]
pub trait OwnerStore: Send + Sync {
    async fn find_owner(&self, owner_id: &str) -> Result<Option<Owner>>;

    async fn upsert_owner(&self, owner: Owner) -> Result<()>;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = backend::SeaOrmStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
