use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::account::LoginDto,
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        service::account::AccountService,
        state::AppState,
    },
};

/// POST /api/auth/login - Verify credentials and open a session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AccountService::new(&state.db);
    let account = service
        .authenticate(&payload.email, &payload.password)
        .await?;

    let auth_session = AuthSession::new(&session);
    auth_session.set_account_id(account.id).await?;

    tracing::info!(account_id = %account.id, "account logged in");

    Ok((StatusCode::OK, Json(account.into_dto())))
}

/// POST /api/auth/logout - Destroy the session.
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).destroy().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me - Get the logged-in account.
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}
