use sea_orm::entity::prelude::*;

/// Delivery record for one templated email. `status` is PENDING, SENT or
/// FAILED; a failed row keeps the SMTP error for diagnosis.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "email_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub template_code: String,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub variables: Json,
    pub status: String,
    pub error: Option<String>,
    pub affiliate_id: Option<Uuid>,
    pub attempts: i32,
    pub sent_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::affiliate::Entity",
        from = "Column::AffiliateId",
        to = "super::affiliate::Column::Id"
    )]
    Affiliate,
}

impl ActiveModelBehavior for ActiveModel {}
