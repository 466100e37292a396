//! Account data repository for database operations.
//!
//! This module provides the `AccountRepository` for managing dashboard
//! operator accounts and their role grants. Password hashes never leave the
//! data layer except through `find_by_email_with_hash`, which the
//! authentication service uses for verification.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::account::{Account, Role, UpdateAccountParam};

/// Repository providing database operations for account management.
pub struct AccountRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an account with its role grants.
    ///
    /// # Arguments
    /// - `email` - Login email (unique)
    /// - `name` - Display name
    /// - `password_hash` - Pre-hashed password (argon2)
    /// - `roles` - Roles to grant
    ///
    /// # Returns
    /// - `Ok(Account)` - The created account with roles attached
    /// - `Err(DbErr)` - Database error (e.g. duplicate email)
    pub async fn insert(
        &self,
        email: String,
        name: String,
        password_hash: String,
        roles: &[Role],
    ) -> Result<Account, DbErr> {
        let entity = entity::account::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(email),
            name: ActiveValue::Set(name),
            password_hash: ActiveValue::Set(password_hash),
            created_at: ActiveValue::Set(Utc::now()),
            last_login_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        let role_entities = self.replace_roles(entity.id, roles).await?;

        Account::from_entity(entity, role_entities)
    }

    /// Finds an account by id, with roles loaded.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DbErr> {
        let Some(entity) = entity::prelude::Account::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let roles = self.roles_for(entity.id).await?;

        Account::from_entity(entity, roles).map(Some)
    }

    /// Finds an account by email, returning the stored password hash
    /// alongside the domain model for credential verification.
    pub async fn find_by_email_with_hash(
        &self,
        email: &str,
    ) -> Result<Option<(Account, String)>, DbErr> {
        let Some(entity) = entity::prelude::Account::find()
            .filter(entity::account::Column::Email.eq(email))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let hash = entity.password_hash.clone();
        let roles = self.roles_for(entity.id).await?;

        Ok(Some((Account::from_entity(entity, roles)?, hash)))
    }

    /// Gets all accounts ordered by name, with roles loaded.
    pub async fn list_all(&self) -> Result<Vec<Account>, DbErr> {
        let entities = entity::prelude::Account::find()
            .order_by_asc(entity::account::Column::Name)
            .all(self.db)
            .await?;

        let all_roles = entity::prelude::AccountRole::find().all(self.db).await?;

        entities
            .into_iter()
            .map(|entity| {
                let roles = all_roles
                    .iter()
                    .filter(|r| r.account_id == entity.id)
                    .cloned()
                    .collect();
                Account::from_entity(entity, roles)
            })
            .collect()
    }

    /// Applies a partial update (name and/or role set).
    ///
    /// # Returns
    /// - `Ok(Some(Account))` - Updated account
    /// - `Ok(None)` - No account with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, param: UpdateAccountParam) -> Result<Option<Account>, DbErr> {
        if self.find_by_id(param.account_id).await?.is_none() {
            return Ok(None);
        }

        if let Some(name) = param.name {
            entity::prelude::Account::update_many()
                .filter(entity::account::Column::Id.eq(param.account_id))
                .col_expr(entity::account::Column::Name, Expr::value(name))
                .exec(self.db)
                .await?;
        }

        if let Some(roles) = param.roles {
            self.replace_roles(param.account_id, &roles).await?;
        }

        self.find_by_id(param.account_id).await
    }

    /// Deletes an account. Role grants go with it via the cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - Account deleted
    /// - `Ok(false)` - No account with that id
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Account::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Overwrites an account's password hash.
    pub async fn update_password(&self, id: Uuid, password_hash: String) -> Result<bool, DbErr> {
        let result = entity::prelude::Account::update_many()
            .filter(entity::account::Column::Id.eq(id))
            .col_expr(
                entity::account::Column::PasswordHash,
                Expr::value(password_hash),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Records a successful login.
    pub async fn update_last_login(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DbErr> {
        entity::prelude::Account::update_many()
            .filter(entity::account::Column::Id.eq(id))
            .col_expr(entity::account::Column::LastLoginAt, Expr::value(now))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Checks whether any account exists.
    ///
    /// Used during startup to decide whether to create the bootstrap admin.
    pub async fn any_exists(&self) -> Result<bool, DbErr> {
        let count = entity::prelude::Account::find().count(self.db).await?;

        Ok(count > 0)
    }

    async fn roles_for(&self, account_id: Uuid) -> Result<Vec<entity::account_role::Model>, DbErr> {
        entity::prelude::AccountRole::find()
            .filter(entity::account_role::Column::AccountId.eq(account_id))
            .all(self.db)
            .await
    }

    /// Replaces all role grants of an account with the given set.
    async fn replace_roles(
        &self,
        account_id: Uuid,
        roles: &[Role],
    ) -> Result<Vec<entity::account_role::Model>, DbErr> {
        entity::prelude::AccountRole::delete_many()
            .filter(entity::account_role::Column::AccountId.eq(account_id))
            .exec(self.db)
            .await?;

        let mut inserted = Vec::with_capacity(roles.len());
        for role in roles {
            let model = entity::account_role::ActiveModel {
                account_id: ActiveValue::Set(account_id),
                role: ActiveValue::Set(role.as_str().to_string()),
            }
            .insert(self.db)
            .await?;
            inserted.push(model);
        }

        Ok(inserted)
    }
}
