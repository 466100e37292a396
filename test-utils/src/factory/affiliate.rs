//! Affiliate factory for creating test referral applications.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test affiliates with customizable fields.
///
/// A sponsor person must exist; pass its id to `new`.
pub struct AffiliateFactory<'a> {
    db: &'a DatabaseConnection,
    sponsor_id: Uuid,
    name: Option<String>,
    email: String,
    status: String,
}

impl<'a> AffiliateFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, sponsor_id: Uuid) -> Self {
        let id = next_id();
        Self {
            db,
            sponsor_id,
            name: Some(format!("Affiliate {}", id)),
            email: format!("affiliate{}@example.com", id),
            status: "PENDING".to_string(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the affiliate entity into the database.
    pub async fn build(self) -> Result<entity::affiliate::Model, DbErr> {
        entity::affiliate::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(self.name),
            email: ActiveValue::Set(self.email),
            sponsor_id: ActiveValue::Set(self.sponsor_id),
            person_id: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            registered_at: ActiveValue::Set(Utc::now()),
            approved_at: ActiveValue::Set(None),
            email_sent: ActiveValue::Set(false),
            email_sent_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending affiliate referred by the given sponsor.
pub async fn create_pending_affiliate(
    db: &DatabaseConnection,
    sponsor_id: Uuid,
) -> Result<entity::affiliate::Model, DbErr> {
    AffiliateFactory::new(db, sponsor_id).build().await
}
