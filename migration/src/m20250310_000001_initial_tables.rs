use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 users 表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Users::ProviderId).string_len(255).null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 short_urls 表
        manager
            .create_table(
                Table::create()
                    .table(ShortUrls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShortUrls::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShortUrls::Alias).string_len(255).not_null())
                    .col(ColumnDef::new(ShortUrls::LongUrl).text().not_null())
                    .col(ColumnDef::new(ShortUrls::Topic).string_len(255).null())
                    .col(ColumnDef::new(ShortUrls::UserId).string_len(36).not_null())
                    .col(
                        ColumnDef::new(ShortUrls::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrls::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_short_urls_user_id")
                            .from(ShortUrls::Table, ShortUrls::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // alias 唯一索引：全局唯一性由数据库约束仲裁，而不是进程内锁
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_urls_alias")
                    .table(ShortUrls::Table)
                    .col(ShortUrls::Alias)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_urls_user_id")
                    .table(ShortUrls::Table)
                    .col(ShortUrls::UserId)
                    .to_owned(),
            )
            .await?;

        // 创建 url_clicks 表
        manager
            .create_table(
                Table::create()
                    .table(UrlClicks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UrlClicks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UrlClicks::ShortUrlId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UrlClicks::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(UrlClicks::UserAgent).text().null())
                    .col(ColumnDef::new(UrlClicks::OsType).string_len(64).not_null())
                    .col(
                        ColumnDef::new(UrlClicks::DeviceType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UrlClicks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_url_clicks_short_url_id")
                            .from(UrlClicks::Table, UrlClicks::ShortUrlId)
                            .to(ShortUrls::Table, ShortUrls::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // short_url_id 索引（单链接统计查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_clicks_short_url_id")
                    .table(UrlClicks::Table)
                    .col(UrlClicks::ShortUrlId)
                    .to_owned(),
            )
            .await?;

        // created_at 索引（时间范围查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_clicks_created_at")
                    .table(UrlClicks::Table)
                    .col(UrlClicks::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_url_clicks_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_url_clicks_short_url_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UrlClicks::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_short_urls_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_short_urls_alias").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShortUrls::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    Name,
    ProviderId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ShortUrls {
    #[sea_orm(iden = "short_urls")]
    Table,
    Id,
    Alias,
    LongUrl,
    Topic,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UrlClicks {
    #[sea_orm(iden = "url_clicks")]
    Table,
    Id,
    ShortUrlId,
    IpAddress,
    UserAgent,
    OsType,
    DeviceType,
    CreatedAt,
}
