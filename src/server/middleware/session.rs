//! Type-safe session management wrapper.
//!
//! Wraps the raw tower-sessions `Session` behind a small interface so session
//! keys live in one place and values keep their types.

use tower_sessions::Session;
use uuid::Uuid;

use crate::server::error::AppError;

// Session key constants
const SESSION_AUTH_ACCOUNT_ID: &str = "auth:account";

/// Authentication session management.
///
/// Handles the authenticated account id and session lifecycle operations.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Gets the underlying Session reference for use with other APIs.
    pub fn inner(&self) -> &Session {
        self.session
    }

    /// Stores the authenticated account's id in the session.
    pub async fn set_account_id(&self, account_id: Uuid) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_ACCOUNT_ID, account_id)
            .await?;
        Ok(())
    }

    /// Gets the authenticated account's id, if any.
    pub async fn account_id(&self) -> Result<Option<Uuid>, AppError> {
        let id = self.session.get::<Uuid>(SESSION_AUTH_ACCOUNT_ID).await?;
        Ok(id)
    }

    /// Destroys the session, logging the account out.
    pub async fn destroy(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}
