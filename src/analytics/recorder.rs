use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::{ClickRecord, ClickSink, ClientContext};
use crate::utils::{ip, user_agent};

/// 点击记录器
///
/// `record` 同步构造记录并派发一个后台写任务后立即返回：
/// 解析响应延迟只取决于缓存/存储读，遥测写永远不在调用方关键路径上。
pub struct ClickRecorder {
    sink: Arc<dyn ClickSink>,
}

impl ClickRecorder {
    pub fn new(sink: Arc<dyn ClickSink>) -> Self {
        Self { sink }
    }

    /// 记录一次点击（fire-and-forget）
    ///
    /// 失败只记 warn 日志，点击丢失是接受的折衷。
    pub fn record(&self, short_url_id: &str, ctx: &ClientContext) {
        let (os_type, device_type) = user_agent::classify(ctx.user_agent.as_deref().unwrap_or(""));

        let record = ClickRecord {
            short_url_id: short_url_id.to_string(),
            ip_address: ip::client_ip(ctx),
            user_agent: ctx.user_agent.clone(),
            os_type,
            device_type,
            timestamp: Utc::now(),
        };

        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(e) = sink.log_click(record).await {
                warn!("Failed to persist click record: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct CountingSink {
        count: AtomicUsize,
        notify: Notify,
    }

    #[async_trait::async_trait]
    impl ClickSink for CountingSink {
        async fn log_click(&self, _record: ClickRecord) -> anyhow::Result<()> {
            self.count.fetch_add(1, Ordering::SeqCst);
            self.notify.notify_one();
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait::async_trait]
    impl ClickSink for FailingSink {
        async fn log_click(&self, _record: ClickRecord) -> anyhow::Result<()> {
            anyhow::bail!("sink unavailable")
        }
    }

    #[tokio::test]
    async fn test_record_dispatches_exactly_one_write() {
        let sink = Arc::new(CountingSink {
            count: AtomicUsize::new(0),
            notify: Notify::new(),
        });
        let recorder = ClickRecorder::new(sink.clone());

        let ctx = ClientContext {
            forwarded_for: Some("203.0.113.9".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
            remote_addr: Some("10.0.0.1:443".to_string()),
        };
        recorder.record("url-1", &ctx);

        // 等待后台写完成
        sink.notify.notified().await;
        assert_eq!(sink.count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_record_swallows_sink_failure() {
        let recorder = ClickRecorder::new(Arc::new(FailingSink));

        // 不会 panic，也没有任何返回值可以失败
        recorder.record("url-1", &ClientContext::default());
        tokio::task::yield_now().await;
    }

    #[tokio::test]
    async fn test_record_handles_empty_context() {
        let sink = Arc::new(CountingSink {
            count: AtomicUsize::new(0),
            notify: Notify::new(),
        });
        let recorder = ClickRecorder::new(sink.clone());

        recorder.record("url-2", &ClientContext::default());
        sink.notify.notified().await;
        assert_eq!(sink.count.load(Ordering::SeqCst), 1);
    }
}
