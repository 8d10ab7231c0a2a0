//! Analytics 相关的数据库查询
//!
//! 点击统计的聚合查询模板，供 AnalyticsService 调用。所有 owner/topic/alias
//! 维度共享同一组参数化定义：范围过滤集中在 `scoped_clicks`，
//! 去重口径集中在 `count_distinct` 列表达式，避免各调用点各写一份。

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
    sea_query::{Expr, Func, SimpleExpr},
};

use migration::entities::{short_url, url_click};

// ============ 查询结果类型 ============

/// 总量查询结果行
#[derive(Debug, Default, FromQueryResult)]
pub struct ClickTotalsRow {
    pub total_clicks: i64,
    pub unique_clicks: i64,
}

/// 按日分组查询结果行
#[derive(Debug, FromQueryResult)]
pub struct DailyClicksRow {
    pub date: String,
    pub clicks: i64,
}

/// OS/设备分组查询结果行
#[derive(Debug, FromQueryResult)]
pub struct BreakdownRow {
    pub name: String,
    pub unique_clicks: i64,
    pub unique_users: i64,
}

/// topic 下按别名分组查询结果行
#[derive(Debug, FromQueryResult)]
pub struct AliasClicksRow {
    pub alias: String,
    pub total_clicks: i64,
    pub unique_clicks: i64,
}

// ============ 共享表达式 ============

/// 点击行计数
fn click_count() -> SimpleExpr {
    url_click::Column::Id.count()
}

/// 去重访客数：不同 IP 地址
fn distinct_ips() -> SimpleExpr {
    Func::count_distinct(Expr::col((url_click::Entity, url_click::Column::IpAddress))).into()
}

/// 去重用户数：不同 User-Agent（行数口径被视为缺陷，见 DESIGN.md）
fn distinct_agents() -> SimpleExpr {
    Func::count_distinct(Expr::col((url_click::Entity, url_click::Column::UserAgent))).into()
}

/// 归属范围过滤：url_clicks JOIN short_urls，owner 必选，topic/alias 可选。
/// 所有点击聚合共用此定义，别名级设备分组也因此始终 owner-scoped。
fn scoped_clicks(
    owner_id: &str,
    topic: Option<&str>,
    alias: Option<&str>,
) -> Select<url_click::Entity> {
    let mut query = url_click::Entity::find()
        .inner_join(short_url::Entity)
        .filter(short_url::Column::UserId.eq(owner_id));

    if let Some(topic) = topic {
        query = query.filter(short_url::Column::Topic.eq(topic));
    }
    if let Some(alias) = alias {
        query = query.filter(short_url::Column::Alias.eq(alias));
    }

    query
}

// ============ SeaOrmStorage Analytics 方法 ============

impl super::SeaOrmStorage {
    /// 按 UTC 日历日截断 url_clicks.created_at 的分组表达式（跨后端）
    fn daily_date_expr(&self) -> Expr {
        match self.get_backend_name() {
            "sqlite" => Expr::cust("strftime('%Y-%m-%d', url_clicks.created_at)"),
            "mysql" => Expr::cust("DATE_FORMAT(url_clicks.created_at, '%Y-%m-%d')"),
            _ => Expr::cust("TO_CHAR(url_clicks.created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD')"),
        }
    }

    /// 统计归属者名下的短链接数量
    pub async fn count_urls_for_owner(&self, owner_id: &str) -> anyhow::Result<u64> {
        short_url::Entity::find()
            .filter(short_url::Column::UserId.eq(owner_id))
            .count(self.get_db())
            .await
            .map_err(Into::into)
    }

    /// 总点击数和去重点击数（owner 必选，topic/alias 进一步收窄）
    pub async fn click_totals(
        &self,
        owner_id: &str,
        topic: Option<&str>,
        alias: Option<&str>,
    ) -> anyhow::Result<ClickTotalsRow> {
        let row = scoped_clicks(owner_id, topic, alias)
            .select_only()
            .column_as(click_count(), "total_clicks")
            .column_as(distinct_ips(), "unique_clicks")
            .into_model::<ClickTotalsRow>()
            .one(self.get_db())
            .await?;

        Ok(row.unwrap_or_default())
    }

    /// 按 UTC 日历日分组的点击数序列
    pub async fn daily_clicks(
        &self,
        owner_id: &str,
        topic: Option<&str>,
        alias: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<DailyClicksRow>> {
        let date_expr = self.daily_date_expr();

        let mut query = scoped_clicks(owner_id, topic, alias);
        if let Some(since) = since {
            query = query.filter(url_click::Column::CreatedAt.gte(since));
        }

        query
            .select_only()
            .column_as(date_expr.clone(), "date")
            .column_as(click_count(), "clicks")
            .group_by(date_expr)
            .order_by_asc(Expr::cust("date"))
            .into_model::<DailyClicksRow>()
            .all(self.get_db())
            .await
            .map_err(Into::into)
    }

    /// OS/设备分组统计
    ///
    /// `category` 只接受 os_type / device_type 两列；owner 级和 alias 级
    /// 分组共用这一个定义。
    pub async fn click_breakdown(
        &self,
        category: url_click::Column,
        owner_id: &str,
        alias: Option<&str>,
    ) -> anyhow::Result<Vec<BreakdownRow>> {
        scoped_clicks(owner_id, None, alias)
            .select_only()
            .column_as(category, "name")
            .column_as(distinct_ips(), "unique_clicks")
            .column_as(distinct_agents(), "unique_users")
            .group_by(category)
            .order_by_asc(Expr::cust("name"))
            .into_model::<BreakdownRow>()
            .all(self.get_db())
            .await
            .map_err(Into::into)
    }

    /// topic 下按别名分组的点击统计（无点击的链接也返回，计数为 0）
    pub async fn alias_rollup_for_topic(
        &self,
        topic: &str,
        owner_id: &str,
    ) -> anyhow::Result<Vec<AliasClicksRow>> {
        short_url::Entity::find()
            .left_join(url_click::Entity)
            .filter(short_url::Column::UserId.eq(owner_id))
            .filter(short_url::Column::Topic.eq(topic))
            .select_only()
            .column(short_url::Column::Alias)
            .column_as(click_count(), "total_clicks")
            .column_as(distinct_ips(), "unique_clicks")
            .group_by(short_url::Column::Alias)
            .order_by_asc(Expr::cust("alias"))
            .into_model::<AliasClicksRow>()
            .all(self.get_db())
            .await
            .map_err(Into::into)
    }
}
