//! Analytics service layer
//!
//! Owner-scoped usage rollups over alias and click data. Every public
//! method is independently computable; the composite `user_metrics`
//! runs its parts concurrently. Aggregations are eventually consistent
//! with respect to in-flight click writes.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{LinklyticsError, Result};
use crate::storage::SeaOrmStorage;
use crate::storage::backend::{AliasClicksRow, BreakdownRow, DailyClicksRow};
use crate::utils::short_url_path;

use migration::entities::url_click;

// ============ 公共类型定义 ============

/// 单日点击数
#[derive(Debug, Clone, Serialize)]
pub struct DailyClicks {
    /// UTC 日历日（YYYY-MM-DD）
    pub date: String,
    pub total_clicks: u64,
}

/// OS/设备分类统计
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub name: String,
    /// 去重访客数（不同 IP）
    pub unique_clicks: u64,
    /// 去重用户数（不同 User-Agent）
    pub unique_users: u64,
}

/// 归属者维度的汇总指标（仪表盘综合结果）
#[derive(Debug, Clone, Serialize)]
pub struct UserMetrics {
    pub total_urls: u64,
    pub total_clicks: u64,
    pub unique_clicks: u64,
    pub clicks_by_date: Vec<DailyClicks>,
    pub os_breakdown: Vec<CategoryBreakdown>,
    pub device_breakdown: Vec<CategoryBreakdown>,
}

/// topic 下单个链接的统计
#[derive(Debug, Clone, Serialize)]
pub struct TopicUrlStats {
    /// 完整短链接路径
    pub short_url: String,
    pub total_clicks: u64,
    pub unique_clicks: u64,
}

/// topic 维度统计
#[derive(Debug, Clone, Serialize)]
pub struct TopicStats {
    pub total_clicks: u64,
    pub unique_clicks: u64,
    pub clicks_by_date: Vec<DailyClicks>,
    pub urls: Vec<TopicUrlStats>,
}

/// 单别名维度统计
#[derive(Debug, Clone, Serialize)]
pub struct AliasStats {
    pub total_clicks: u64,
    pub unique_clicks: u64,
    /// 最近 7 天的按日序列
    pub clicks_by_date: Vec<DailyClicks>,
    pub os_breakdown: Vec<CategoryBreakdown>,
    pub device_breakdown: Vec<CategoryBreakdown>,
}

// ============ AnalyticsService ============

/// Analytics 服务
pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
    base_url: String,
}

impl AnalyticsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        let config = crate::config::get_config();
        Self {
            storage,
            base_url: config.server.base_url.clone(),
        }
    }

    /// 归属者名下的短链接总数
    pub async fn total_urls(&self, owner_id: &str) -> Result<u64> {
        self.storage
            .count_urls_for_owner(owner_id)
            .await
            .map_err(query_failed)
    }

    /// 归属者名下所有链接的总点击数
    pub async fn total_clicks(&self, owner_id: &str) -> Result<u64> {
        let totals = self
            .storage
            .click_totals(owner_id, None, None)
            .await
            .map_err(query_failed)?;
        Ok(totals.total_clicks as u64)
    }

    /// 去重点击数（不同 IP 地址）
    pub async fn unique_clicks(&self, owner_id: &str) -> Result<u64> {
        let totals = self
            .storage
            .click_totals(owner_id, None, None)
            .await
            .map_err(query_failed)?;
        Ok(totals.unique_clicks as u64)
    }

    /// 按 UTC 日历日分组的点击数
    pub async fn clicks_by_date(&self, owner_id: &str) -> Result<Vec<DailyClicks>> {
        let rows = self
            .storage
            .daily_clicks(owner_id, None, None, None)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(daily_from_row).collect())
    }

    /// OS 维度分组统计
    pub async fn os_breakdown(&self, owner_id: &str) -> Result<Vec<CategoryBreakdown>> {
        let rows = self
            .storage
            .click_breakdown(url_click::Column::OsType, owner_id, None)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(breakdown_from_row).collect())
    }

    /// 设备维度分组统计
    pub async fn device_breakdown(&self, owner_id: &str) -> Result<Vec<CategoryBreakdown>> {
        let rows = self
            .storage
            .click_breakdown(url_click::Column::DeviceType, owner_id, None)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(breakdown_from_row).collect())
    }

    /// 归属者综合指标
    ///
    /// 各项聚合互不依赖，使用 `tokio::try_join!` 并发执行。
    pub async fn user_metrics(&self, owner_id: &str) -> Result<UserMetrics> {
        info!("Analytics: user_metrics for owner {}", owner_id);

        let (total_urls, totals, daily_rows, os_rows, device_rows) = tokio::try_join!(
            self.storage.count_urls_for_owner(owner_id),
            self.storage.click_totals(owner_id, None, None),
            self.storage.daily_clicks(owner_id, None, None, None),
            self.storage
                .click_breakdown(url_click::Column::OsType, owner_id, None),
            self.storage
                .click_breakdown(url_click::Column::DeviceType, owner_id, None),
        )
        .map_err(query_failed)?;

        Ok(UserMetrics {
            total_urls,
            total_clicks: totals.total_clicks as u64,
            unique_clicks: totals.unique_clicks as u64,
            clicks_by_date: daily_rows.into_iter().map(daily_from_row).collect(),
            os_breakdown: os_rows.into_iter().map(breakdown_from_row).collect(),
            device_breakdown: device_rows.into_iter().map(breakdown_from_row).collect(),
        })
    }

    /// topic 维度统计
    pub async fn topic_stats(&self, topic: &str, owner_id: &str) -> Result<TopicStats> {
        info!("Analytics: topic_stats '{}' for owner {}", topic, owner_id);

        let (totals, daily_rows, alias_rows) = tokio::try_join!(
            self.storage.click_totals(owner_id, Some(topic), None),
            self.storage.daily_clicks(owner_id, Some(topic), None, None),
            self.storage.alias_rollup_for_topic(topic, owner_id),
        )
        .map_err(query_failed)?;

        debug!(
            "Analytics: topic '{}' covers {} aliases",
            topic,
            alias_rows.len()
        );

        Ok(TopicStats {
            total_clicks: totals.total_clicks as u64,
            unique_clicks: totals.unique_clicks as u64,
            clicks_by_date: daily_rows.into_iter().map(daily_from_row).collect(),
            urls: alias_rows
                .into_iter()
                .map(|row| self.topic_url_from_row(row))
                .collect(),
        })
    }

    /// 单别名维度统计（按日序列取最近 7 天）
    pub async fn alias_stats(&self, alias: &str, owner_id: &str) -> Result<AliasStats> {
        info!("Analytics: alias_stats '{}' for owner {}", alias, owner_id);

        let since = Utc::now() - Duration::days(7);

        let (totals, daily_rows, os_rows, device_rows) = tokio::try_join!(
            self.storage.click_totals(owner_id, None, Some(alias)),
            self.storage
                .daily_clicks(owner_id, None, Some(alias), Some(since)),
            self.storage
                .click_breakdown(url_click::Column::OsType, owner_id, Some(alias)),
            self.storage
                .click_breakdown(url_click::Column::DeviceType, owner_id, Some(alias)),
        )
        .map_err(query_failed)?;

        Ok(AliasStats {
            total_clicks: totals.total_clicks as u64,
            unique_clicks: totals.unique_clicks as u64,
            clicks_by_date: daily_rows.into_iter().map(daily_from_row).collect(),
            os_breakdown: os_rows.into_iter().map(breakdown_from_row).collect(),
            device_breakdown: device_rows.into_iter().map(breakdown_from_row).collect(),
        })
    }

    fn topic_url_from_row(&self, row: AliasClicksRow) -> TopicUrlStats {
        TopicUrlStats {
            short_url: short_url_path(&self.base_url, &row.alias),
            total_clicks: row.total_clicks as u64,
            unique_clicks: row.unique_clicks as u64,
        }
    }
}

fn query_failed(e: anyhow::Error) -> LinklyticsError {
    LinklyticsError::database_operation(format!("Analytics query failed: {}", e))
}

fn daily_from_row(row: DailyClicksRow) -> DailyClicks {
    DailyClicks {
        date: row.date,
        total_clicks: row.clicks as u64,
    }
}

fn breakdown_from_row(row: BreakdownRow) -> CategoryBreakdown {
    CategoryBreakdown {
        name: row.name,
        unique_clicks: row.unique_clicks as u64,
        unique_users: row.unique_users as u64,
    }
}
