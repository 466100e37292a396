use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::net::SocketAddr;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    model::{
        affiliate::{
            AffiliateDto, AffiliateStatsDto, ApprovalResultDto, CreateAffiliateDto,
            DailyCountDto, DailyStatsDto, PaginatedAffiliatesDto, RejectAffiliateDto,
        },
        api::ErrorDto,
    },
    server::{
        controller::request_meta,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::affiliate::{
            AffiliateStatus, ApprovalDelivery, ApproveAffiliateParams, CreateAffiliateParam,
            ListAffiliatesParam, RejectAffiliateParams,
        },
        service::{affiliate::AffiliateService, dashboard::DashboardService},
        state::AppState,
    },
};

/// Tag for grouping affiliate endpoints in OpenAPI documentation
pub static AFFILIATE_TAG: &str = "affiliate";

#[derive(Deserialize)]
pub struct AffiliateListParams {
    /// Status filter; omit or pass "ALL" for no filter.
    pub status: Option<String>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    25
}

#[derive(Deserialize)]
pub struct DaysParams {
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    30
}

/// Get paginated affiliates, optionally filtered by status.
///
/// # Access Control
/// - Any logged-in account
#[utoipa::path(
    get,
    path = "/api/affiliates",
    tag = AFFILIATE_TAG,
    params(
        ("status" = Option<String>, Query, description = "Status filter (PENDING, SENT, REJECTED, ALREADY_MEMBER or ALL)"),
        ("page" = Option<u64>, Query, description = "Zero-indexed page"),
        ("entries" = Option<u64>, Query, description = "Entries per page")
    ),
    responses(
        (status = 200, description = "Page of affiliates", body = PaginatedAffiliatesDto),
        (status = 400, description = "Unknown status filter", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_affiliates(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<AffiliateListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let status = parse_status_filter(params.status.as_deref())?;

    let service = AffiliateService::new(&state.db, state.http_client.clone(), &state.config);
    let page = service
        .list(ListAffiliatesParam {
            status,
            page: params.page,
            per_page: params.entries.clamp(1, 200),
        })
        .await?;

    let dto = PaginatedAffiliatesDto {
        affiliates: page
            .affiliates
            .into_iter()
            .map(|(affiliate, sponsor_name)| affiliate.into_dto(sponsor_name))
            .collect(),
        total: page.total,
        page: page.page,
        per_page: page.per_page,
        total_pages: page.total_pages,
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// Get a single affiliate.
#[utoipa::path(
    get,
    path = "/api/affiliates/{id}",
    tag = AFFILIATE_TAG,
    params(("id" = Uuid, Path, description = "Affiliate id")),
    responses(
        (status = 200, description = "Affiliate", body = AffiliateDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Affiliate not found", body = ErrorDto)
    ),
)]
pub async fn get_affiliate(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = AffiliateService::new(&state.db, state.http_client.clone(), &state.config);
    let (affiliate, sponsor_name) = service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Affiliate not found".to_string()))?;

    Ok((StatusCode::OK, Json(affiliate.into_dto(sponsor_name))))
}

/// Register a new referral application.
///
/// # Access Control
/// - `Edit` - Editors and admins
#[utoipa::path(
    post,
    path = "/api/affiliates",
    tag = AFFILIATE_TAG,
    request_body = CreateAffiliateDto,
    responses(
        (status = 201, description = "Application registered", body = AffiliateDto),
        (status = 400, description = "Invalid application data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
)]
pub async fn create_affiliate(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateAffiliateDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Edit])
        .await?;

    let service = AffiliateService::new(&state.db, state.http_client.clone(), &state.config);
    let affiliate = service
        .register(CreateAffiliateParam {
            name: payload.name,
            email: payload.email,
            sponsor_id: payload.sponsor_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(affiliate.into_dto(None))))
}

/// Approve a pending affiliate: assigns an invite code, updates counters and
/// notifies the applicant and sponsor.
///
/// # Access Control
/// - `Edit` - Editors and admins
#[utoipa::path(
    post,
    path = "/api/affiliates/{id}/approve",
    tag = AFFILIATE_TAG,
    params(("id" = Uuid, Path, description = "Affiliate id")),
    responses(
        (status = 200, description = "Approval committed", body = ApprovalResultDto),
        (status = 400, description = "Affiliate or sponsor fails validation", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Affiliate or sponsor not found", body = ErrorDto),
        (status = 409, description = "Code pool exhausted or concurrent update", body = ErrorDto)
    ),
)]
pub async fn approve_affiliate(
    State(state): State<AppState>,
    session: Session,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Edit])
        .await?;

    let (ip_address, user_agent) = request_meta(&headers, &addr);

    let service = AffiliateService::new(&state.db, state.http_client.clone(), &state.config);
    let outcome = service
        .approve(ApproveAffiliateParams {
            affiliate_id: id,
            account_id: Some(account.id),
            ip_address,
            user_agent,
            delivery: ApprovalDelivery::Webhook,
        })
        .await?;

    let dto = ApprovalResultDto {
        affiliate: outcome.affiliate.into_dto(None),
        code: outcome.code.into_dto(),
        email_sent: outcome.email_sent,
        warnings: outcome.warnings,
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// Reject a pending affiliate. The reason is kept in the audit trail.
///
/// # Access Control
/// - `Edit` - Editors and admins
#[utoipa::path(
    post,
    path = "/api/affiliates/{id}/reject",
    tag = AFFILIATE_TAG,
    params(("id" = Uuid, Path, description = "Affiliate id")),
    request_body = RejectAffiliateDto,
    responses(
        (status = 200, description = "Affiliate rejected", body = AffiliateDto),
        (status = 400, description = "Affiliate is not pending", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Affiliate not found", body = ErrorDto),
        (status = 409, description = "Concurrent update", body = ErrorDto)
    ),
)]
pub async fn reject_affiliate(
    State(state): State<AppState>,
    session: Session,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectAffiliateDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Edit])
        .await?;

    let (ip_address, user_agent) = request_meta(&headers, &addr);

    let service = AffiliateService::new(&state.db, state.http_client.clone(), &state.config);
    let affiliate = service
        .reject(RejectAffiliateParams {
            affiliate_id: id,
            reason: payload.reason,
            account_id: Some(account.id),
            ip_address,
            user_agent,
        })
        .await?;

    Ok((StatusCode::OK, Json(affiliate.into_dto(None))))
}

/// Get affiliate totals grouped by status.
#[utoipa::path(
    get,
    path = "/api/affiliates/stats",
    tag = AFFILIATE_TAG,
    responses(
        (status = 200, description = "Status breakdown", body = AffiliateStatsDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn affiliate_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let breakdown = DashboardService::new(&state.db).affiliate_stats().await?;

    Ok((
        StatusCode::OK,
        Json(AffiliateStatsDto {
            total: breakdown.total,
            pending: breakdown.pending,
            sent: breakdown.sent,
            rejected: breakdown.rejected,
            already_member: breakdown.already_member,
        }),
    ))
}

/// Get affiliate registrations per day for the last N days.
#[utoipa::path(
    get,
    path = "/api/affiliates/stats-per-day",
    tag = AFFILIATE_TAG,
    params(("days" = Option<u32>, Query, description = "Window size in days (default 30)")),
    responses(
        (status = 200, description = "Per-day counts", body = DailyStatsDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn affiliates_per_day(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<DaysParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let counts = DashboardService::new(&state.db)
        .affiliates_per_day(params.days)
        .await?;

    Ok((StatusCode::OK, Json(daily_stats_dto(counts, params.days))))
}

/// Converts fold results into the per-day stats DTO.
pub(crate) fn daily_stats_dto(
    counts: Vec<crate::server::model::dashboard::DailyCount>,
    days: u32,
) -> DailyStatsDto {
    let total = counts.iter().map(|c| c.count).sum();
    DailyStatsDto {
        stats: counts
            .into_iter()
            .map(|c| DailyCountDto {
                date: c.date.to_string(),
                count: c.count,
            })
            .collect(),
        total,
        days,
    }
}

/// Parses the status query filter. "ALL" and absence mean no filter.
fn parse_status_filter(status: Option<&str>) -> Result<Option<AffiliateStatus>, AppError> {
    match status {
        None => Ok(None),
        Some("ALL") | Some("all") => Ok(None),
        Some(value) => AffiliateStatus::from_db(value)
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Unknown status filter \"{value}\""))),
    }
}
