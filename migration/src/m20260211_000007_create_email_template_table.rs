use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailTemplate::Table)
                    .if_not_exists()
                    .col(pk_uuid(EmailTemplate::Id))
                    .col(string_uniq(EmailTemplate::Code))
                    .col(string(EmailTemplate::Name))
                    .col(string(EmailTemplate::Subject))
                    .col(text(EmailTemplate::Body))
                    .col(string_null(EmailTemplate::SenderName))
                    .col(string_null(EmailTemplate::SenderEmail))
                    .col(boolean(EmailTemplate::Active).default(true))
                    .col(
                        timestamp_with_time_zone(EmailTemplate::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(EmailTemplate::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmailTemplate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmailTemplate {
    Table,
    Id,
    Code,
    Name,
    Subject,
    Body,
    SenderName,
    SenderEmail,
    Active,
    CreatedAt,
    UpdatedAt,
}
