use sea_orm::entity::prelude::*;

/// Referral application. `person_id` is set once the applicant becomes a
/// community member; until then only the submitted contact data is known.
///
/// `status` holds one of PENDING, SENT, REJECTED, ALREADY_MEMBER.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "affiliate")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub sponsor_id: Uuid,
    pub person_id: Option<Uuid>,
    pub status: String,
    pub registered_at: DateTimeUtc,
    pub approved_at: Option<DateTimeUtc>,
    pub email_sent: bool,
    pub email_sent_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::SponsorId",
        to = "super::person::Column::Id"
    )]
    Sponsor,
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id"
    )]
    Person,
}

impl ActiveModelBehavior for ActiveModel {}
