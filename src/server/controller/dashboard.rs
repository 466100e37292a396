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
        affiliate::AffiliateDto,
        dashboard::{DashboardMetricsDto, StateCountDto},
    },
    server::{
        controller::affiliate::daily_stats_dto,
        error::AppError,
        middleware::auth::AuthGuard,
        service::dashboard::DashboardService,
        state::AppState,
    },
};

/// Rows returned by the latest-affiliates widget.
const LATEST_AFFILIATES_LIMIT: u64 = 10;

#[derive(Deserialize)]
pub struct DaysParams {
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    30
}

/// GET /api/dashboard/metrics - Headline numbers.
pub async fn metrics(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let (breakdown, sponsors, available_codes) =
        DashboardService::new(&state.db).metrics().await?;

    Ok((
        StatusCode::OK,
        Json(DashboardMetricsDto {
            total_affiliates: breakdown.total,
            pending_affiliates: breakdown.pending,
            sent_affiliates: breakdown.sent,
            rejected_affiliates: breakdown.rejected,
            total_sponsors: sponsors,
            available_codes,
        }),
    ))
}

/// GET /api/dashboard/latest-affiliates - Most recent applications.
pub async fn latest_affiliates(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let affiliates = DashboardService::new(&state.db)
        .latest_affiliates(LATEST_AFFILIATES_LIMIT)
        .await?;

    let dto: Vec<AffiliateDto> = affiliates
        .into_iter()
        .map(|(affiliate, sponsor_name)| affiliate.into_dto(sponsor_name))
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// GET /api/dashboard/sponsors-per-day - Sponsor sign-ups per day.
pub async fn sponsors_per_day(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<DaysParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let counts = DashboardService::new(&state.db)
        .sponsors_per_day(params.days)
        .await?;

    Ok((StatusCode::OK, Json(daily_stats_dto(counts, params.days))))
}

/// GET /api/dashboard/affiliates-per-state - Member distribution by UF.
pub async fn affiliates_per_state(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let counts = DashboardService::new(&state.db).affiliates_per_state().await?;

    let dto: Vec<StateCountDto> = counts
        .into_iter()
        .map(|c| StateCountDto {
            state: c.state,
            count: c.count,
        })
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// GET /api/dashboard/sponsors-per-state - Sponsor distribution by UF.
pub async fn sponsors_per_state(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let counts = DashboardService::new(&state.db).sponsors_per_state().await?;

    let dto: Vec<StateCountDto> = counts
        .into_iter()
        .map(|c| StateCountDto {
            state: c.state,
            count: c.count,
        })
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}
