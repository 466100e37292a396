//! Account service: operator management and credential verification.
//!
//! Passwords are hashed with argon2 before they reach the data layer; the
//! clear text never leaves this module.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::account::AccountRepository,
    error::{auth::AuthError, AppError},
    model::account::{Account, CreateAccountParam, UpdateAccountParam},
};

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Service providing business logic for account management.
pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks whether any account exists. Used by startup bootstrap.
    pub async fn any_account_exists(&self) -> Result<bool, AppError> {
        let repo = AccountRepository::new(self.db);
        let exists = repo.any_exists().await?;
        Ok(exists)
    }

    /// Creates an account with hashed credentials and role grants.
    ///
    /// # Returns
    /// - `Ok(Account)` - The created account
    /// - `Err(AppError::BadRequest)` - Validation failure (email, password, roles)
    /// - `Err(AppError::DbErr)` - Database error (e.g. duplicate email)
    pub async fn create(&self, param: CreateAccountParam) -> Result<Account, AppError> {
        if param.email.trim().is_empty() {
            return Err(AppError::BadRequest("Email is required".to_string()));
        }
        if param.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        if param.roles.is_empty() {
            return Err(AppError::BadRequest(
                "At least one role is required".to_string(),
            ));
        }

        let password_hash = hash_password(&param.password)?;

        let repo = AccountRepository::new(self.db);
        let account = repo
            .insert(param.email, param.name, password_hash, &param.roles)
            .await?;

        Ok(account)
    }

    /// Verifies credentials and records the login.
    ///
    /// A missing account and a wrong password are indistinguishable to the
    /// caller, both map to `InvalidCredentials`.
    ///
    /// # Returns
    /// - `Ok(Account)` - Credentials valid
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Unknown email or wrong password
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let repo = AccountRepository::new(self.db);

        let Some((account, stored_hash)) = repo.find_by_email_with_hash(email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &stored_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        repo.update_last_login(account.id, Utc::now()).await?;

        Ok(account)
    }

    /// Gets an account by id.
    pub async fn get(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let repo = AccountRepository::new(self.db);
        let account = repo.find_by_id(id).await?;
        Ok(account)
    }

    /// Gets all accounts ordered by name.
    pub async fn list_all(&self) -> Result<Vec<Account>, AppError> {
        let repo = AccountRepository::new(self.db);
        let accounts = repo.list_all().await?;
        Ok(accounts)
    }

    /// Applies a partial update to an account.
    ///
    /// # Returns
    /// - `Ok(Account)` - Updated account
    /// - `Err(AppError::BadRequest)` - Empty role set
    /// - `Err(AppError::NotFound)` - No account with that id
    pub async fn update(&self, param: UpdateAccountParam) -> Result<Account, AppError> {
        if let Some(roles) = &param.roles {
            if roles.is_empty() {
                return Err(AppError::BadRequest(
                    "At least one role is required".to_string(),
                ));
            }
        }

        let repo = AccountRepository::new(self.db);
        let account = repo
            .update(param)
            .await?
            .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

        Ok(account)
    }

    /// Deletes an account.
    ///
    /// # Returns
    /// - `Ok(())` - Account deleted
    /// - `Err(AppError::NotFound)` - No account with that id
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let repo = AccountRepository::new(self.db);
        if !repo.delete(id).await? {
            return Err(AppError::NotFound("Account not found".to_string()));
        }
        Ok(())
    }

    /// Changes the acting account's own password.
    ///
    /// The current password must verify before the new one is stored.
    ///
    /// # Returns
    /// - `Ok(())` - Password updated
    /// - `Err(AppError::BadRequest)` - New password too short
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Current password wrong
    pub async fn change_own_password(
        &self,
        actor: &Account,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        validate_new_password(new_password)?;

        let repo = AccountRepository::new(self.db);

        let Some((_, stored_hash)) = repo.find_by_email_with_hash(&actor.email).await? else {
            return Err(AuthError::AccountNotInDatabase(actor.id).into());
        };

        if !verify_password(current_password, &stored_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        repo.update_password(actor.id, hash_password(new_password)?)
            .await?;

        Ok(())
    }

    /// Resets another account's password without the current one.
    ///
    /// Caller must have already verified the actor is an admin.
    ///
    /// # Returns
    /// - `Ok(())` - Password updated
    /// - `Err(AppError::BadRequest)` - New password too short
    /// - `Err(AppError::NotFound)` - No account with that id
    pub async fn reset_password(&self, target: Uuid, new_password: &str) -> Result<(), AppError> {
        validate_new_password(new_password)?;

        let repo = AccountRepository::new(self.db);
        if !repo
            .update_password(target, hash_password(new_password)?)
            .await?
        {
            return Err(AppError::NotFound("Account not found".to_string()));
        }

        Ok(())
    }
}

fn validate_new_password(new_password: &str) -> Result<(), AppError> {
    if new_password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hashes a password with argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored argon2 hash.
fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash is invalid: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();
        assert_ne!(first, second);
    }
}
