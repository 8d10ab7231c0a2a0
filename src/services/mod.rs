//! Service layer
//!
//! Business logic for allocation, resolution and analytics, shared by
//! whatever boundary (HTTP, RPC) embeds this crate.

pub mod analytics_service;
pub mod link_service;
pub mod resolver_service;

pub use analytics_service::{
    AliasStats, AnalyticsService, CategoryBreakdown, DailyClicks, TopicStats, TopicUrlStats,
    UserMetrics,
};
pub use link_service::{CreateLinkRequest, LinkCreateResult, LinkService, LinkSummary};
pub use resolver_service::ResolverService;
