use sea_orm_migration::{prelude::*, schema::*};

use super::m20260210_000002_create_affiliate_table::Affiliate;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailLog::Table)
                    .if_not_exists()
                    .col(pk_uuid(EmailLog::Id))
                    .col(string(EmailLog::TemplateCode))
                    .col(string(EmailLog::RecipientEmail))
                    .col(string_null(EmailLog::RecipientName))
                    .col(string(EmailLog::Subject))
                    .col(text(EmailLog::Body))
                    .col(json(EmailLog::Variables))
                    .col(string(EmailLog::Status))
                    .col(string_null(EmailLog::Error))
                    .col(uuid_null(EmailLog::AffiliateId))
                    .col(integer(EmailLog::Attempts).default(0))
                    .col(timestamp_with_time_zone_null(EmailLog::SentAt))
                    .col(
                        timestamp_with_time_zone(EmailLog::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_log_affiliate_id")
                            .from(EmailLog::Table, EmailLog::AffiliateId)
                            .to(Affiliate::Table, Affiliate::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmailLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmailLog {
    Table,
    Id,
    TemplateCode,
    RecipientEmail,
    RecipientName,
    Subject,
    Body,
    Variables,
    Status,
    Error,
    AffiliateId,
    Attempts,
    SentAt,
    CreatedAt,
}
