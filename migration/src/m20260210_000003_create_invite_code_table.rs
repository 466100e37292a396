use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InviteCode::Table)
                    .if_not_exists()
                    .col(pk_uuid(InviteCode::Id))
                    .col(string_uniq(InviteCode::Code))
                    .col(string_null(InviteCode::Email))
                    .col(boolean(InviteCode::Used).default(false))
                    .col(timestamp_with_time_zone_null(InviteCode::AssignedAt))
                    .col(
                        timestamp_with_time_zone(InviteCode::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invite_code_used")
                    .table(InviteCode::Table)
                    .col(InviteCode::Used)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InviteCode::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InviteCode {
    Table,
    Id,
    Code,
    Email,
    Used,
    AssignedAt,
    CreatedAt,
}
