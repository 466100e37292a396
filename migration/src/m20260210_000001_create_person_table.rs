use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(pk_uuid(Person::Id))
                    .col(string(Person::Name))
                    .col(string_uniq(Person::Email))
                    .col(string_null(Person::Cpf))
                    .col(date_null(Person::BirthDate))
                    .col(string_null(Person::Sex))
                    .col(string_null(Person::City))
                    .col(string_null(Person::State))
                    .col(string_null(Person::Niche))
                    .col(string_null(Person::Phone))
                    .col(boolean(Person::Active).default(true))
                    .col(integer(Person::InvitesSent).default(0))
                    .col(integer(Person::InvitesUsed).default(0))
                    .col(timestamp_with_time_zone_null(Person::LastPaymentAt))
                    .col(
                        timestamp_with_time_zone(Person::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Person::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Person {
    Table,
    Id,
    Name,
    Email,
    Cpf,
    BirthDate,
    Sex,
    City,
    State,
    Niche,
    Phone,
    Active,
    InvitesSent,
    InvitesUsed,
    LastPaymentAt,
    CreatedAt,
}
