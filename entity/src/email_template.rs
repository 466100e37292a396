use sea_orm::entity::prelude::*;

/// Configurable email template. `subject` and `body` may contain
/// `{{ variable }}` placeholders substituted at send time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "email_template")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
