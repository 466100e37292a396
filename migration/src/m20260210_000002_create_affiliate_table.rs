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
                    .table(Affiliate::Table)
                    .if_not_exists()
                    .col(pk_uuid(Affiliate::Id))
                    .col(string_null(Affiliate::Name))
                    .col(string(Affiliate::Email))
                    .col(uuid(Affiliate::SponsorId))
                    .col(uuid_null(Affiliate::PersonId))
                    .col(string(Affiliate::Status))
                    .col(
                        timestamp_with_time_zone(Affiliate::RegisteredAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Affiliate::ApprovedAt))
                    .col(boolean(Affiliate::EmailSent).default(false))
                    .col(timestamp_with_time_zone_null(Affiliate::EmailSentAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_affiliate_sponsor_id")
                            .from(Affiliate::Table, Affiliate::SponsorId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_affiliate_person_id")
                            .from(Affiliate::Table, Affiliate::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_affiliate_status")
                    .table(Affiliate::Table)
                    .col(Affiliate::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Affiliate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Affiliate {
    Table,
    Id,
    Name,
    Email,
    SponsorId,
    PersonId,
    Status,
    RegisteredAt,
    ApprovedAt,
    EmailSent,
    EmailSentAt,
}
