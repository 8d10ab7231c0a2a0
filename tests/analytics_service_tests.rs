//! AnalyticsService 集成测试（SQLite）
//!
//! 覆盖六类聚合：链接总数、总点击/去重点击、按日分组、OS/设备分组、
//! topic 统计和单别名统计，以及 user_metrics 综合结果。

use std::sync::{Arc, Once};

use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

use linklytics::analytics::{ClickRecord, ClickSink};
use linklytics::config::init_config;
use linklytics::services::AnalyticsService;
use linklytics::storage::{NewShortUrl, Owner, SeaOrmStorage, ShortUrl};

// =============================================================================
// 全局初始化与种子数据
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
    let p = td.path().join("analytics_svc_test.db");
    let u = format!("sqlite://{}?mode=rwc", p.display());
    let s = SeaOrmStorage::new(&u, "sqlite").await.unwrap();
    (Arc::new(s), td)
}

async fn seed_owner(storage: &SeaOrmStorage, id: &str) {
    let now = Utc::now();
    storage
        .upsert_owner(Owner {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            name: id.to_string(),
            provider_id: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
}

async fn seed_link(
    storage: &SeaOrmStorage,
    alias: &str,
    owner_id: &str,
    topic: Option<&str>,
) -> ShortUrl {
    storage
        .insert_short_url(NewShortUrl {
            alias: alias.to_string(),
            long_url: format!("https://example.com/{}", alias),
            topic: topic.map(String::from),
            owner_id: owner_id.to_string(),
        })
        .await
        .unwrap()
}

struct Click<'a> {
    ip: &'a str,
    agent: &'a str,
    os: &'a str,
    device: &'a str,
    at: DateTime<Utc>,
}

async fn seed_click(storage: &SeaOrmStorage, short_url_id: &str, click: Click<'_>) {
    storage
        .log_click(ClickRecord {
            short_url_id: short_url_id.to_string(),
            ip_address: Some(click.ip.to_string()),
            user_agent: Some(click.agent.to_string()),
            os_type: click.os.to_string(),
            device_type: click.device.to_string(),
            timestamp: click.at,
        })
        .await
        .unwrap();
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
}

const WINDOWS_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0) Chrome/120.0";
const WINDOWS_FIREFOX: &str = "Mozilla/5.0 (Windows NT 10.0; rv:120.0) Firefox/120.0";
const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0) Safari/604.1";

// =============================================================================
// 归属者维度聚合
// =============================================================================

#[tokio::test]
async fn test_totals_and_unique_clicks() {
    let (storage, _td) = create_temp_storage().await;
    seed_owner(&storage, "owner-1").await;
    let link = seed_link(&storage, "aaa", "owner-1", None).await;

    // 3 次点击，2 个不同 IP
    for (ip, at) in [
        ("203.0.113.9", day(2024, 6, 1)),
        ("203.0.113.9", day(2024, 6, 1)),
        ("198.51.100.2", day(2024, 6, 2)),
    ] {
        seed_click(
            &storage,
            &link.id,
            Click { ip, agent: WINDOWS_CHROME, os: "Windows 10", device: "pc", at },
        )
        .await;
    }

    let service = AnalyticsService::new(storage.clone());
    assert_eq!(service.total_urls("owner-1").await.unwrap(), 1);
    assert_eq!(service.total_clicks("owner-1").await.unwrap(), 3);
    assert_eq!(service.unique_clicks("owner-1").await.unwrap(), 2);
}

#[tokio::test]
async fn test_aggregations_are_owner_scoped() {
    let (storage, _td) = create_temp_storage().await;
    seed_owner(&storage, "owner-1").await;
    seed_owner(&storage, "owner-2").await;
    let mine = seed_link(&storage, "mine", "owner-1", None).await;
    let theirs = seed_link(&storage, "theirs", "owner-2", None).await;

    seed_click(
        &storage,
        &mine.id,
        Click { ip: "203.0.113.9", agent: WINDOWS_CHROME, os: "Windows 10", device: "pc", at: day(2024, 6, 1) },
    )
    .await;
    seed_click(
        &storage,
        &theirs.id,
        Click { ip: "198.51.100.2", agent: IPHONE_SAFARI, os: "iPhone", device: "smartphone", at: day(2024, 6, 1) },
    )
    .await;

    let service = AnalyticsService::new(storage.clone());
    assert_eq!(service.total_urls("owner-1").await.unwrap(), 1);
    assert_eq!(service.total_clicks("owner-1").await.unwrap(), 1);
    // owner-2 的点击不会泄漏进 owner-1 的分组
    let os = service.os_breakdown("owner-1").await.unwrap();
    assert_eq!(os.len(), 1);
    assert_eq!(os[0].name, "Windows 10");
}

#[tokio::test]
async fn test_clicks_by_date_groups_utc_days() {
    let (storage, _td) = create_temp_storage().await;
    seed_owner(&storage, "owner-1").await;
    let link = seed_link(&storage, "aaa", "owner-1", None).await;

    // 两个自然日：6/1 两次，6/2 一次
    for at in [day(2024, 6, 1), day(2024, 6, 1), day(2024, 6, 2)] {
        seed_click(
            &storage,
            &link.id,
            Click { ip: "203.0.113.9", agent: WINDOWS_CHROME, os: "Windows 10", device: "pc", at },
        )
        .await;
    }

    let service = AnalyticsService::new(storage.clone());
    let by_date = service.clicks_by_date("owner-1").await.unwrap();

    assert_eq!(by_date.len(), 2);
    assert_eq!(by_date[0].date, "2024-06-01");
    assert_eq!(by_date[0].total_clicks, 2);
    assert_eq!(by_date[1].date, "2024-06-02");
    assert_eq!(by_date[1].total_clicks, 1);

    // 分组计数之和等于总点击数
    let sum: u64 = by_date.iter().map(|d| d.total_clicks).sum();
    assert_eq!(sum, service.total_clicks("owner-1").await.unwrap());
}

#[tokio::test]
async fn test_breakdown_counts_distinct_agents() {
    let (storage, _td) = create_temp_storage().await;
    seed_owner(&storage, "owner-1").await;
    let link = seed_link(&storage, "aaa", "owner-1", None).await;

    // 同一 IP、同一 OS，两个不同 User-Agent
    for agent in [WINDOWS_CHROME, WINDOWS_FIREFOX] {
        seed_click(
            &storage,
            &link.id,
            Click { ip: "203.0.113.9", agent, os: "Windows 10", device: "pc", at: day(2024, 6, 1) },
        )
        .await;
    }

    let service = AnalyticsService::new(storage.clone());
    let os = service.os_breakdown("owner-1").await.unwrap();

    assert_eq!(os.len(), 1);
    assert_eq!(os[0].name, "Windows 10");
    // unique_clicks 按 IP 去重，unique_users 按 User-Agent 去重（不是行数）
    assert_eq!(os[0].unique_clicks, 1);
    assert_eq!(os[0].unique_users, 2);

    let device = service.device_breakdown("owner-1").await.unwrap();
    assert_eq!(device.len(), 1);
    assert_eq!(device[0].name, "pc");
    assert_eq!(device[0].unique_clicks, 1);
    assert_eq!(device[0].unique_users, 2);
}

// =============================================================================
// topic 维度
// =============================================================================

#[tokio::test]
async fn test_topic_stats_with_zero_click_link() {
    let (storage, _td) = create_temp_storage().await;
    seed_owner(&storage, "owner-1").await;
    let hot = seed_link(&storage, "hot", "owner-1", Some("marketing")).await;
    let _cold = seed_link(&storage, "cold", "owner-1", Some("marketing")).await;
    let _other = seed_link(&storage, "other", "owner-1", Some("docs")).await;

    for ip in ["203.0.113.9", "198.51.100.2"] {
        seed_click(
            &storage,
            &hot.id,
            Click { ip, agent: WINDOWS_CHROME, os: "Windows 10", device: "pc", at: day(2024, 6, 1) },
        )
        .await;
    }

    let service = AnalyticsService::new(storage.clone());
    let stats = service.topic_stats("marketing", "owner-1").await.unwrap();

    assert_eq!(stats.total_clicks, 2);
    assert_eq!(stats.unique_clicks, 2);
    assert_eq!(stats.clicks_by_date.len(), 1);

    // 无点击的链接也在列表中，计数为 0；别名渲染成完整短链接路径
    assert_eq!(stats.urls.len(), 2);
    let cold_entry = stats
        .urls
        .iter()
        .find(|u| u.short_url == "http://localhost:8080/shorten/cold")
        .unwrap();
    assert_eq!(cold_entry.total_clicks, 0);
    assert_eq!(cold_entry.unique_clicks, 0);

    let hot_entry = stats
        .urls
        .iter()
        .find(|u| u.short_url == "http://localhost:8080/shorten/hot")
        .unwrap();
    assert_eq!(hot_entry.total_clicks, 2);
}

#[tokio::test]
async fn test_topic_stats_empty_topic() {
    let (storage, _td) = create_temp_storage().await;
    seed_owner(&storage, "owner-1").await;

    let service = AnalyticsService::new(storage.clone());
    let stats = service.topic_stats("nothing-here", "owner-1").await.unwrap();

    assert_eq!(stats.total_clicks, 0);
    assert_eq!(stats.unique_clicks, 0);
    assert!(stats.clicks_by_date.is_empty());
    assert!(stats.urls.is_empty());
}

// =============================================================================
// 单别名维度
// =============================================================================

#[tokio::test]
async fn test_alias_stats_seven_day_window() {
    let (storage, _td) = create_temp_storage().await;
    seed_owner(&storage, "owner-1").await;
    let link = seed_link(&storage, "aaa", "owner-1", None).await;

    let recent = Utc::now() - Duration::days(1);
    let old = Utc::now() - Duration::days(30);

    seed_click(
        &storage,
        &link.id,
        Click { ip: "203.0.113.9", agent: WINDOWS_CHROME, os: "Windows 10", device: "pc", at: recent },
    )
    .await;
    seed_click(
        &storage,
        &link.id,
        Click { ip: "198.51.100.2", agent: IPHONE_SAFARI, os: "iPhone", device: "smartphone", at: old },
    )
    .await;

    let service = AnalyticsService::new(storage.clone());
    let stats = service.alias_stats("aaa", "owner-1").await.unwrap();

    // 总量不受窗口限制，按日序列只含最近 7 天
    assert_eq!(stats.total_clicks, 2);
    assert_eq!(stats.unique_clicks, 2);
    assert_eq!(stats.clicks_by_date.len(), 1);
    assert_eq!(stats.clicks_by_date[0].total_clicks, 1);

    // 分组覆盖全部历史
    assert_eq!(stats.os_breakdown.len(), 2);
    assert_eq!(stats.device_breakdown.len(), 2);
}

#[tokio::test]
async fn test_alias_breakdowns_are_owner_scoped() {
    let (storage, _td) = create_temp_storage().await;
    seed_owner(&storage, "owner-1").await;
    seed_owner(&storage, "owner-2").await;
    let link = seed_link(&storage, "ga1", "owner-1", None).await;

    seed_click(
        &storage,
        &link.id,
        Click { ip: "203.0.113.9", agent: WINDOWS_CHROME, os: "Windows 10", device: "pc", at: day(2024, 6, 1) },
    )
    .await;

    let service = AnalyticsService::new(storage.clone());

    // 非归属者查询别的归属者的别名：设备分组和 OS 分组一样，都不泄漏
    let stats = service.alias_stats("ga1", "owner-2").await.unwrap();
    assert_eq!(stats.total_clicks, 0);
    assert!(stats.os_breakdown.is_empty());
    assert!(stats.device_breakdown.is_empty());
}

// =============================================================================
// 综合指标
// =============================================================================

#[tokio::test]
async fn test_user_metrics_matches_independent_rollups() {
    let (storage, _td) = create_temp_storage().await;
    seed_owner(&storage, "owner-1").await;
    let a = seed_link(&storage, "aaa", "owner-1", None).await;
    let _b = seed_link(&storage, "bbb", "owner-1", None).await;

    for (ip, agent, os, device, at) in [
        ("203.0.113.9", WINDOWS_CHROME, "Windows 10", "pc", day(2024, 6, 1)),
        ("198.51.100.2", IPHONE_SAFARI, "iPhone", "smartphone", day(2024, 6, 2)),
    ] {
        seed_click(&storage, &a.id, Click { ip, agent, os, device, at }).await;
    }

    let service = AnalyticsService::new(storage.clone());
    let metrics = service.user_metrics("owner-1").await.unwrap();

    assert_eq!(metrics.total_urls, service.total_urls("owner-1").await.unwrap());
    assert_eq!(
        metrics.total_clicks,
        service.total_clicks("owner-1").await.unwrap()
    );
    assert_eq!(
        metrics.unique_clicks,
        service.unique_clicks("owner-1").await.unwrap()
    );
    assert_eq!(metrics.clicks_by_date.len(), 2);
    assert_eq!(metrics.os_breakdown.len(), 2);
    assert_eq!(metrics.device_breakdown.len(), 2);
}
