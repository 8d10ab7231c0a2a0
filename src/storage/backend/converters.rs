use sea_orm::ActiveValue::Set;

use crate::storage::{Owner, ShortUrl};
use migration::entities::{short_url, user};

/// 将 Sea-ORM Model 转换为 ShortUrl
pub fn model_to_short_url(model: short_url::Model) -> ShortUrl {
    ShortUrl {
        id: model.id,
        alias: model.alias,
        long_url: model.long_url,
        topic: model.topic,
        owner_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 将 ShortUrl 转换为 ActiveModel（用于插入）
pub fn short_url_to_active_model(record: &ShortUrl) -> short_url::ActiveModel {
    short_url::ActiveModel {
        id: Set(record.id.clone()),
        alias: Set(record.alias.clone()),
        long_url: Set(record.long_url.clone()),
        topic: Set(record.topic.clone()),
        user_id: Set(record.owner_id.clone()),
        created_at: Set(record.created_at),
        updated_at: Set(record.updated_at),
    }
}

/// 将 Sea-ORM Model 转换为 Owner
pub fn model_to_owner(model: user::Model) -> Owner {
    Owner {
        id: model.id,
        email: model.email,
        name: model.name,
        provider_id: model.provider_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 将 Owner 转换为 ActiveModel（用于 upsert）
pub fn owner_to_active_model(owner: &Owner) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(owner.id.clone()),
        email: Set(owner.email.clone()),
        name: Set(owner.name.clone()),
        provider_id: Set(owner.provider_id.clone()),
        created_at: Set(owner.created_at),
        updated_at: Set(owner.updated_at),
    }
}
