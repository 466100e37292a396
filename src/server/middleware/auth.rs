//! Authentication and authorization guard for request handlers.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::account::AccountRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::account::Account,
};

/// Permission levels a handler can require on top of being logged in.
pub enum Permission {
    /// ADMIN role required.
    Admin,
    /// ADMIN or EDITOR role required.
    Edit,
}

/// Guard resolving the session to an account and checking permissions.
///
/// An empty permission slice means "any logged-in account" - viewers
/// included.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the session and enforces the required permissions.
    ///
    /// # Returns
    /// - `Ok(Account)` - Authenticated account satisfying every permission
    /// - `Err(AppError::AuthErr(NotLoggedIn))` - No session
    /// - `Err(AppError::AuthErr(AccountNotInDatabase))` - Stale session
    /// - `Err(AppError::AuthErr(AccessDenied))` - Missing role
    pub async fn require(&self, permissions: &[Permission]) -> Result<Account, AppError> {
        let auth_session = AuthSession::new(self.session);

        let Some(account_id) = auth_session.account_id().await? else {
            return Err(AuthError::NotLoggedIn.into());
        };

        let account_repo = AccountRepository::new(self.db);
        let Some(account) = account_repo.find_by_id(account_id).await? else {
            return Err(AuthError::AccountNotInDatabase(account_id).into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !account.is_admin() {
                        return Err(AuthError::AccessDenied(
                            account_id,
                            "admin role required".to_string(),
                        )
                        .into());
                    }
                }
                Permission::Edit => {
                    if !account.can_edit() {
                        return Err(AuthError::AccessDenied(
                            account_id,
                            "editor or admin role required".to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(account)
    }
}
