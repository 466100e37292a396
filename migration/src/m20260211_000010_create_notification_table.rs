use sea_orm_migration::{prelude::*, schema::*};

use super::m20260210_000001_create_person_table::Person;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_uuid(Notification::Id))
                    .col(uuid_null(Notification::PersonId))
                    .col(string(Notification::Kind))
                    .col(string(Notification::Title))
                    .col(string(Notification::Message))
                    .col(json_null(Notification::Data))
                    .col(boolean(Notification::Read).default(false))
                    .col(
                        timestamp_with_time_zone(Notification::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_person_id")
                            .from(Notification::Table, Notification::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Notification {
    Table,
    Id,
    PersonId,
    Kind,
    Title,
    Message,
    Data,
    Read,
    CreatedAt,
}
