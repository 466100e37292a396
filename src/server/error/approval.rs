use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Business-rule failures in the affiliate approval/rejection workflow.
///
/// Each variant corresponds to one validation or concurrency check. Conflict
/// variants signal a lost race against a concurrent approval, not a bug.
#[derive(Error, Debug)]
pub enum ApprovalError {
    /// No affiliate with the requested id.
    #[error("Affiliate not found")]
    AffiliateNotFound,

    /// Affiliate is not in PENDING status.
    ///
    /// # Fields
    /// - The status the affiliate is actually in
    #[error("Affiliate is not pending (status: {0})")]
    NotPending(String),

    /// The affiliate's sponsor does not exist.
    #[error("Sponsor not found")]
    SponsorNotFound,

    /// The sponsor is deactivated.
    #[error("Sponsor is inactive")]
    SponsorInactive,

    /// The sponsor has no remaining invite balance.
    #[error("Sponsor has no invites available")]
    NoInvitesAvailable,

    /// No unused invite codes left in the pool.
    #[error("Invite codes exhausted")]
    CodesExhausted,

    /// The selected code was claimed by a concurrent approval between the
    /// SELECT and the conditional UPDATE.
    #[error("Invite code already assigned")]
    CodeConflict,

    /// The affiliate row changed status between validation and the guarded
    /// UPDATE. The assigned code has been released.
    #[error("Affiliate was modified concurrently")]
    AffiliateConflict,
}

/// Maps approval errors to HTTP responses.
///
/// # Returns
/// - 404 Not Found - Missing affiliate or sponsor
/// - 400 Bad Request - Status or quota validation failures
/// - 409 Conflict - Exhausted code pool or lost concurrency races
impl IntoResponse for ApprovalError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::AffiliateNotFound | Self::SponsorNotFound => StatusCode::NOT_FOUND,
            Self::NotPending(_) | Self::SponsorInactive | Self::NoInvitesAvailable => {
                StatusCode::BAD_REQUEST
            }
            Self::CodesExhausted | Self::CodeConflict | Self::AffiliateConflict => {
                StatusCode::CONFLICT
            }
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
