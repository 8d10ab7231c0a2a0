//! 统计查询索引
//!
//! 为 OS/设备分组和单链接时间序列查询补充复合索引。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 复合索引（单链接时间序列查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_clicks_short_url_time")
                    .table(UrlClicks::Table)
                    .col(UrlClicks::ShortUrlId)
                    .col(UrlClicks::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_clicks_os_type")
                    .table(UrlClicks::Table)
                    .col(UrlClicks::OsType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_clicks_device_type")
                    .table(UrlClicks::Table)
                    .col(UrlClicks::DeviceType)
                    .to_owned(),
            )
            .await?;

        // topic 过滤（topic 统计查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_urls_topic")
                    .table(ShortUrls::Table)
                    .col(ShortUrls::Topic)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_short_urls_topic").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_url_clicks_device_type").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_url_clicks_os_type").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_url_clicks_short_url_time")
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ShortUrls {
    #[sea_orm(iden = "short_urls")]
    Table,
    Topic,
}

#[derive(DeriveIden)]
enum UrlClicks {
    #[sea_orm(iden = "url_clicks")]
    Table,
    ShortUrlId,
    OsType,
    DeviceType,
    CreatedAt,
}
