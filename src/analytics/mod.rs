//! Click telemetry pipeline
//!
//! A successful resolution produces one immutable `ClickRecord`, dispatched
//! by `ClickRecorder` to a `ClickSink` without the resolution caller
//! waiting on the write.

pub mod recorder;
pub mod sink;

pub use recorder::ClickRecorder;
pub use sink::{ClickSink, StdoutSink};

use chrono::{DateTime, Utc};

/// 边界层透传的调用方信息
///
/// 全部是不透明字符串且都可能缺失，核心不假设请求头存在。
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    /// X-Forwarded-For 请求头原值（可能含多个逗号分隔地址）
    pub forwarded_for: Option<String>,
    /// User-Agent 请求头原值
    pub user_agent: Option<String>,
    /// 传输层对端地址
    pub remote_addr: Option<String>,
}

/// 一次解析产生的点击记录（追加写入，永不更新）
#[derive(Debug, Clone)]
pub struct ClickRecord {
    pub short_url_id: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub os_type: String,
    pub device_type: String,
    pub timestamp: DateTime<Utc>,
}
