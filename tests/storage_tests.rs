//! SeaOrmStorage 集成测试（SQLite）
//!
//! 覆盖唯一约束的 Conflict 翻译、别名查询、归属范围查询、
//! 归属者目录和点击写入。

use std::sync::{Arc, Once};

use chrono::Utc;
use tempfile::TempDir;

use linklytics::analytics::{ClickRecord, ClickSink};
use linklytics::config::init_config;
use linklytics::errors::LinklyticsError;
use linklytics::storage::{NewShortUrl, Owner, SeaOrmStorage};

// =============================================================================
// 全局初始化
// =============================================================================

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_static_config();
    let td = TempDir::new().unwrap();
    let p = td.path().join("storage_test.db");
    let u = format!("sqlite://{}?mode=rwc", p.display());
    let s = SeaOrmStorage::new(&u, "sqlite").await.unwrap();
    (Arc::new(s), td)
}

fn owner(id: &str) -> Owner {
    let now = Utc::now();
    Owner {
        id: id.to_string(),
        email: format!("{}@example.com", id),
        name: format!("Owner {}", id),
        provider_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn new_url(alias: &str, owner_id: &str) -> NewShortUrl {
    NewShortUrl {
        alias: alias.to_string(),
        long_url: format!("https://example.com/{}", alias),
        topic: None,
        owner_id: owner_id.to_string(),
    }
}

// =============================================================================
// 插入与唯一约束
// =============================================================================

#[tokio::test]
async fn test_insert_and_find_by_alias() {
    let (storage, _td) = create_temp_storage().await;
    storage.upsert_owner(owner("owner-1")).await.unwrap();

    let created = storage.insert_short_url(new_url("abc123", "owner-1")).await.unwrap();
    assert_eq!(created.alias, "abc123");
    assert!(!created.id.is_empty());

    let found = storage.find_by_alias("abc123").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.long_url, "https://example.com/abc123");
    assert_eq!(found.owner_id, "owner-1");
}

#[tokio::test]
async fn test_find_absent_alias_returns_none() {
    let (storage, _td) = create_temp_storage().await;

    let found = storage.find_by_alias("doesnotexist").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_duplicate_alias_translates_to_conflict() {
    let (storage, _td) = create_temp_storage().await;
    storage.upsert_owner(owner("owner-1")).await.unwrap();
    storage.upsert_owner(owner("owner-2")).await.unwrap();

    storage.insert_short_url(new_url("abc123", "owner-1")).await.unwrap();

    // 随机碰撞等价场景：不经预检直接插入重复别名，
    // 唯一约束冲突必须翻译为 Conflict 而不是数据库错误
    let result = storage.insert_short_url(new_url("abc123", "owner-2")).await;
    assert!(matches!(result, Err(LinklyticsError::Conflict(_))));
}

#[tokio::test]
async fn test_alias_exists() {
    let (storage, _td) = create_temp_storage().await;
    storage.upsert_owner(owner("owner-1")).await.unwrap();

    assert!(!storage.alias_exists("abc123").await.unwrap());
    storage.insert_short_url(new_url("abc123", "owner-1")).await.unwrap();
    assert!(storage.alias_exists("abc123").await.unwrap());
}

// =============================================================================
// 归属范围查询
// =============================================================================

#[tokio::test]
async fn test_list_for_owner_is_scoped() {
    let (storage, _td) = create_temp_storage().await;
    storage.upsert_owner(owner("owner-1")).await.unwrap();
    storage.upsert_owner(owner("owner-2")).await.unwrap();

    storage.insert_short_url(new_url("aaa", "owner-1")).await.unwrap();
    storage.insert_short_url(new_url("bbb", "owner-1")).await.unwrap();
    storage.insert_short_url(new_url("ccc", "owner-2")).await.unwrap();

    let links = storage.list_for_owner("owner-1").await.unwrap();
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|l| l.owner_id == "owner-1"));

    let links = storage.list_for_owner("owner-3").await.unwrap();
    assert!(links.is_empty());
}

// =============================================================================
// 归属者目录
// =============================================================================

#[tokio::test]
async fn test_owner_upsert_and_find() {
    let (storage, _td) = create_temp_storage().await;

    assert!(storage.find_owner("owner-1").await.unwrap().is_none());

    storage.upsert_owner(owner("owner-1")).await.unwrap();
    let found = storage.find_owner("owner-1").await.unwrap().unwrap();
    assert_eq!(found.email, "owner-1@example.com");

    // upsert 更新已有记录而不是报冲突
    let mut updated = owner("owner-1");
    updated.name = "Renamed".to_string();
    storage.upsert_owner(updated).await.unwrap();
    let found = storage.find_owner("owner-1").await.unwrap().unwrap();
    assert_eq!(found.name, "Renamed");
}

// =============================================================================
// 点击写入
// =============================================================================

fn click(short_url_id: &str, ip: &str) -> ClickRecord {
    ClickRecord {
        short_url_id: short_url_id.to_string(),
        ip_address: Some(ip.to_string()),
        user_agent: Some("Mozilla/5.0".to_string()),
        os_type: "Windows 10".to_string(),
        device_type: "pc".to_string(),
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn test_log_click_appends_row() {
    let (storage, _td) = create_temp_storage().await;
    storage.upsert_owner(owner("owner-1")).await.unwrap();
    let created = storage.insert_short_url(new_url("abc123", "owner-1")).await.unwrap();

    storage
        .log_click(click(&created.id, "203.0.113.9"))
        .await
        .unwrap();

    let totals = storage.click_totals("owner-1", None, None).await.unwrap();
    assert_eq!(totals.total_clicks, 1);
}

#[tokio::test]
async fn test_log_click_enforces_short_url_reference() {
    let (storage, _td) = create_temp_storage().await;

    // ClickEvent 必须引用记录时存在的 ShortUrl
    let result = storage.log_click(click("no-such-id", "203.0.113.9")).await;
    assert!(result.is_err());
}
