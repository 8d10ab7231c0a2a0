//! ClickSink implementation for SeaOrmStorage
//!
//! Appends one url_clicks row per record. Writes are retried against
//! transient failures; a final failure is reported to the caller
//! (the recorder logs and drops it).

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, EntityTrait};
use tracing::debug;

use super::SeaOrmStorage;
use super::retry;
use crate::analytics::{ClickRecord, ClickSink};

use migration::entities::url_click;

#[async_trait]
impl ClickSink for SeaOrmStorage {
    async fn log_click(&self, record: ClickRecord) -> anyhow::Result<()> {
        let model = url_click::ActiveModel {
            short_url_id: Set(record.short_url_id.clone()),
            ip_address: Set(record.ip_address.clone()),
            user_agent: Set(record.user_agent.clone()),
            os_type: Set(record.os_type.clone()),
            device_type: Set(record.device_type.clone()),
            created_at: Set(record.timestamp),
            ..Default::default()
        };

        let db = &self.db;
        retry::with_retry("log_click", self.retry_config, || async {
            url_click::Entity::insert(model.clone()).exec(db).await
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to insert click record: {}", e))?;

        debug!(
            "Click record written for short_url_id {}",
            record.short_url_id
        );

        Ok(())
    }
}
