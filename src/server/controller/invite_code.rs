use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        affiliate::DailyStatsDto,
        api::ErrorDto,
        invite_code::{
            GenerateCodesDto, GenerateCodesResultDto, InviteCodeStatsDto,
            PaginatedInviteCodesDto,
        },
    },
    server::{
        controller::affiliate::daily_stats_dto,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::{dashboard::DashboardService, invite_code::InviteCodeService},
        state::AppState,
    },
};

/// Tag for grouping invite code endpoints in OpenAPI documentation
pub static INVITE_CODE_TAG: &str = "invite-code";

#[derive(Deserialize)]
pub struct CodeListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    50
}

#[derive(Deserialize)]
pub struct DaysParams {
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    30
}

/// Get paginated invite codes, newest first.
#[utoipa::path(
    get,
    path = "/api/invite-codes",
    tag = INVITE_CODE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Zero-indexed page"),
        ("entries" = Option<u64>, Query, description = "Entries per page")
    ),
    responses(
        (status = 200, description = "Page of codes", body = PaginatedInviteCodesDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn list_codes(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CodeListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = InviteCodeService::new(&state.db);
    let page = service
        .list(params.page, params.entries.clamp(1, 200))
        .await?;

    let dto = PaginatedInviteCodesDto {
        codes: page.codes.into_iter().map(|c| c.into_dto()).collect(),
        total: page.total,
        page: page.page,
        per_page: page.per_page,
        total_pages: page.total_pages,
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// Generate a batch of unique invite codes.
///
/// # Access Control
/// - `Admin` - Only admins can grow the pool
#[utoipa::path(
    post,
    path = "/api/invite-codes/generate",
    tag = INVITE_CODE_TAG,
    request_body = GenerateCodesDto,
    responses(
        (status = 201, description = "Codes generated", body = GenerateCodesResultDto),
        (status = 400, description = "Quantity out of range", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
)]
pub async fn generate_codes(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<GenerateCodesDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = InviteCodeService::new(&state.db);
    let generated = service.generate(payload.quantity, Some(account.id)).await?;

    Ok((StatusCode::CREATED, Json(GenerateCodesResultDto { generated })))
}

/// Get pool statistics (total / available / used).
#[utoipa::path(
    get,
    path = "/api/invite-codes/stats",
    tag = INVITE_CODE_TAG,
    responses(
        (status = 200, description = "Pool statistics", body = InviteCodeStatsDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn code_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let (total, available, used) = InviteCodeService::new(&state.db).stats().await?;

    Ok((
        StatusCode::OK,
        Json(InviteCodeStatsDto {
            total,
            available,
            used,
        }),
    ))
}

/// Get code assignments per day for the last N days.
#[utoipa::path(
    get,
    path = "/api/invite-codes/stats-per-day",
    tag = INVITE_CODE_TAG,
    params(("days" = Option<u32>, Query, description = "Window size in days (default 30)")),
    responses(
        (status = 200, description = "Per-day counts", body = DailyStatsDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn codes_per_day(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<DaysParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let counts = DashboardService::new(&state.db)
        .codes_per_day(params.days)
        .await?;

    Ok((StatusCode::OK, Json(daily_stats_dto(counts, params.days))))
}
