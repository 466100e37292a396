use sea_orm::entity::prelude::*;

/// Community member. People with a nonzero invite quota act as sponsors.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub cpf: Option<String>,
    pub birth_date: Option<Date>,
    pub sex: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub niche: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub invites_sent: i32,
    pub invites_used: i32,
    pub last_payment_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::notification::Entity")]
    Notification,
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
