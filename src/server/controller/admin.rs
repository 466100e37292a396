use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::net::SocketAddr;
use tower_sessions::Session;

use crate::server::{
    controller::request_meta,
    error::AppError,
    middleware::auth::{AuthGuard, Permission},
    service::anonymize::AnonymizeService,
    state::AppState,
};

#[derive(Serialize)]
pub struct AnonymizeResultDto {
    pub total: u64,
    pub updated: u64,
    pub errors: u64,
}

/// POST /api/admin/anonymize - Replace every person's name and email with
/// synthetic values. Meant for copies of production data, not production.
///
/// # Access Control
/// - `Admin`
pub async fn anonymize(
    State(state): State<AppState>,
    session: Session,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let (ip_address, user_agent) = request_meta(&headers, &addr);

    let stats = AnonymizeService::new(&state.db)
        .run(Some(account.id), ip_address, user_agent)
        .await?;

    Ok((
        StatusCode::OK,
        Json(AnonymizeResultDto {
            total: stats.total,
            updated: stats.updated,
            errors: stats.errors,
        }),
    ))
}
