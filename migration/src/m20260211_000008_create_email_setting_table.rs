use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailSetting::Table)
                    .if_not_exists()
                    .col(string(EmailSetting::Key).primary_key())
                    .col(string(EmailSetting::Value))
                    .col(string(EmailSetting::Group))
                    .col(
                        timestamp_with_time_zone(EmailSetting::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmailSetting::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmailSetting {
    Table,
    Key,
    Value,
    Group,
    UpdatedAt,
}
