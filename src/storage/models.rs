use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 短链接记录
///
/// 作为不可变快照整体写入缓存，字段与 short_urls 表一一对应。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortUrl {
    pub id: String,
    pub alias: String,
    pub long_url: String,
    pub topic: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 待插入的短链接（id 和时间戳由存储层生成）
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub alias: String,
    pub long_url: String,
    pub topic: Option<String>,
    pub owner_id: String,
}

/// 链接归属者（users 表的只读视图，生命周期归身份服务所有）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub email: String,
    pub name: String,
    pub provider_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
