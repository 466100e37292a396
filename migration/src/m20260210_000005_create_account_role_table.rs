use sea_orm_migration::{prelude::*, schema::*};

use super::m20260210_000004_create_account_table::Account;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountRole::Table)
                    .if_not_exists()
                    .col(uuid(AccountRole::AccountId))
                    .col(string(AccountRole::Role))
                    .primary_key(
                        Index::create()
                            .col(AccountRole::AccountId)
                            .col(AccountRole::Role),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_role_account_id")
                            .from(AccountRole::Table, AccountRole::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccountRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AccountRole {
    Table,
    AccountId,
    Role,
}
