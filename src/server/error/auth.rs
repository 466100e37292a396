use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No account id stored in the session.
    ///
    /// The request carries no authenticated session. Results in a
    /// 401 Unauthorized response.
    #[error("No authenticated account in session")]
    NotLoggedIn,

    /// Session references an account that no longer exists.
    ///
    /// The account was deleted while its session was still alive. Results in a
    /// 401 Unauthorized response.
    #[error("Account {0} from session not found in database")]
    AccountNotInDatabase(Uuid),

    /// Email/password pair did not match any account.
    ///
    /// Results in a 401 Unauthorized response with a deliberately vague message.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account lacks a role required for the attempted operation.
    ///
    /// Results in a 403 Forbidden response.
    #[error("Account {0} denied: {1}")]
    AccessDenied(Uuid, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Missing or stale sessions and bad credentials map to 401 with generic messages;
/// role failures map to 403. Details are logged at debug level while client-facing
/// messages stay generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::NotLoggedIn | Self::AccountNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Not logged in".to_string(),
                }),
            )
                .into_response(),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Invalid email or password".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(account_id, reason) => {
                tracing::debug!(%account_id, reason, "access denied");
                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "Insufficient permissions".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
