use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum EmailError {
    /// No active template with the requested code.
    #[error("Email template \"{0}\" not found or inactive")]
    TemplateNotFound(String),

    /// SMTP settings are missing required keys (host/user/password).
    #[error("SMTP settings incomplete; configure them in the admin panel")]
    SmtpConfigIncomplete,

    /// The notification webhook URL is not configured.
    #[error("Notification webhook URL not configured")]
    WebhookNotConfigured,

    /// All delivery attempts failed.
    #[error("Email delivery failed after {0} attempts")]
    RetriesExhausted(usize),

    /// Recipient or sender address could not be parsed.
    #[error(transparent)]
    Address(#[from] lettre::address::AddressError),

    /// SMTP transport failure.
    #[error(transparent)]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Message construction failure.
    #[error(transparent)]
    Message(#[from] lettre::error::Error),
}

/// Maps email errors to HTTP responses.
///
/// Missing templates are 404, incomplete configuration is 400 (the caller can
/// fix it in the admin panel), transport failures are 500 with details logged
/// server-side only.
impl IntoResponse for EmailError {
    fn into_response(self) -> Response {
        match self {
            Self::TemplateNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::SmtpConfigIncomplete | Self::WebhookNotConfigured => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            err => {
                tracing::error!("email error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Email delivery failed".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
