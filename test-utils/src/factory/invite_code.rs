//! Invite code factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test invite codes.
pub struct InviteCodeFactory<'a> {
    db: &'a DatabaseConnection,
    code: String,
    email: Option<String>,
    used: bool,
}

impl<'a> InviteCodeFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            code: format!("CODE{:04}", next_id() % 10_000),
            email: None,
            used: false,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn assigned_to(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.used = true;
        self
    }

    /// Builds and inserts the invite code entity into the database.
    pub async fn build(self) -> Result<entity::invite_code::Model, DbErr> {
        let assigned_at = self.used.then(Utc::now);
        entity::invite_code::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            code: ActiveValue::Set(self.code),
            email: ActiveValue::Set(self.email),
            used: ActiveValue::Set(self.used),
            assigned_at: ActiveValue::Set(assigned_at),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unused invite code.
pub async fn create_code(db: &DatabaseConnection) -> Result<entity::invite_code::Model, DbErr> {
    InviteCodeFactory::new(db).build().await
}

/// Creates a code already assigned to the given email.
pub async fn create_used_code(
    db: &DatabaseConnection,
    email: impl Into<String>,
) -> Result<entity::invite_code::Model, DbErr> {
    InviteCodeFactory::new(db).assigned_to(email).build().await
}
