//! Account factory for creating test operator accounts.
//!
//! The stored password hash is an opaque string; tests exercising real
//! credential verification should hash through the account service instead.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test accounts with role grants.
pub struct AccountFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    name: String,
    password_hash: String,
    roles: Vec<String>,
}

impl<'a> AccountFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("operator{}@example.com", id),
            name: format!("Operator {}", id),
            password_hash: "unverifiable-test-hash".to_string(),
            roles: vec!["VIEWER".to_string()],
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    pub fn roles(mut self, roles: &[&str]) -> Self {
        self.roles = roles.iter().map(|r| r.to_string()).collect();
        self
    }

    /// Builds and inserts the account with its role grants.
    pub async fn build(self) -> Result<entity::account::Model, DbErr> {
        let account = entity::account::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(self.email),
            name: ActiveValue::Set(self.name),
            password_hash: ActiveValue::Set(self.password_hash),
            created_at: ActiveValue::Set(Utc::now()),
            last_login_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        for role in &self.roles {
            entity::account_role::ActiveModel {
                account_id: ActiveValue::Set(account.id),
                role: ActiveValue::Set(role.clone()),
            }
            .insert(self.db)
            .await?;
        }

        Ok(account)
    }
}

/// Creates a viewer account with default values.
pub async fn create_account(db: &DatabaseConnection) -> Result<entity::account::Model, DbErr> {
    AccountFactory::new(db).build().await
}

/// Creates an account with the ADMIN role.
pub async fn create_admin_account(
    db: &DatabaseConnection,
) -> Result<entity::account::Model, DbErr> {
    AccountFactory::new(db).roles(&["ADMIN"]).build().await
}
