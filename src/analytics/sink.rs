use super::ClickRecord;

/// 点击记录 Sink
///
/// 至多一次、尽力而为：写失败由调用方记日志后丢弃，不重试不上抛。
#[async_trait::async_trait]
pub trait ClickSink: Send + Sync {
    async fn log_click(&self, record: ClickRecord) -> anyhow::Result<()>;
}

pub struct StdoutSink;

#[async_trait::async_trait]
impl ClickSink for StdoutSink {
    async fn log_click(&self, record: ClickRecord) -> anyhow::Result<()> {
        println!("Click record: {:?}", record);
        Ok(())
    }
}
