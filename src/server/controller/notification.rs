use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    model::notification::NotificationDto,
    server::{
        error::AppError, middleware::auth::AuthGuard,
        service::notification::NotificationService, state::AppState,
    },
};

/// Rows returned by the notification inbox.
const INBOX_LIMIT: u64 = 50;

/// GET /api/notifications - Unread notifications, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let notifications = NotificationService::new(&state.db)
        .list_unread(INBOX_LIMIT)
        .await?;

    let dto: Vec<NotificationDto> = notifications.into_iter().map(|n| n.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// POST /api/notifications/{id}/read - Mark one notification read.
pub async fn mark_read(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    NotificationService::new(&state.db).mark_read(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
