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
        affiliate::AffiliateDto,
        api::ErrorDto,
        sponsor::{SponsorDto, SponsorRankingEntryDto, UpdateSponsorInvitesDto},
    },
    server::{
        controller::request_meta,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::person::UpdateQuotaParam,
        service::person::PersonService,
        state::AppState,
    },
};

/// Tag for grouping sponsor endpoints in OpenAPI documentation
pub static SPONSOR_TAG: &str = "sponsor";

/// Sponsors shown in the ranking endpoint.
const RANKING_SIZE: u64 = 10;

#[derive(Deserialize)]
pub struct SponsorListParams {
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

/// Get sponsors with quota numbers and per-status affiliate counts.
#[utoipa::path(
    get,
    path = "/api/sponsors",
    tag = SPONSOR_TAG,
    params(("limit" = Option<u64>, Query, description = "Maximum rows (default 100)")),
    responses(
        (status = 200, description = "Sponsor list", body = Vec<SponsorDto>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn list_sponsors(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SponsorListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = PersonService::new(&state.db);
    let sponsors = service.list_sponsors(params.limit.clamp(1, 500)).await?;

    let dto: Vec<SponsorDto> = sponsors
        .into_iter()
        .map(|(person, stats)| person.into_sponsor_dto(stats))
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Get one sponsor.
#[utoipa::path(
    get,
    path = "/api/sponsors/{id}",
    tag = SPONSOR_TAG,
    params(("id" = Uuid, Path, description = "Sponsor (person) id")),
    responses(
        (status = 200, description = "Sponsor", body = SponsorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Sponsor not found", body = ErrorDto)
    ),
)]
pub async fn get_sponsor(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = PersonService::new(&state.db);
    let (person, stats) = service
        .get_sponsor(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Sponsor not found".to_string()))?;

    Ok((StatusCode::OK, Json(person.into_sponsor_dto(stats))))
}

/// Get all affiliates referred by one sponsor.
#[utoipa::path(
    get,
    path = "/api/sponsors/{id}/affiliates",
    tag = SPONSOR_TAG,
    params(("id" = Uuid, Path, description = "Sponsor (person) id")),
    responses(
        (status = 200, description = "Affiliates of the sponsor", body = Vec<AffiliateDto>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn sponsor_affiliates(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = PersonService::new(&state.db);
    let affiliates = service.sponsor_affiliates(id).await?;

    let dto: Vec<AffiliateDto> = affiliates
        .into_iter()
        .map(|a| a.into_dto(None))
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// Overwrite a sponsor's invite quota counters.
///
/// # Access Control
/// - `Edit` - Editors and admins
#[utoipa::path(
    put,
    path = "/api/sponsors/{id}/invites",
    tag = SPONSOR_TAG,
    params(("id" = Uuid, Path, description = "Sponsor (person) id")),
    request_body = UpdateSponsorInvitesDto,
    responses(
        (status = 200, description = "Sponsor with updated counters", body = SponsorDto),
        (status = 400, description = "Invalid counter values", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Sponsor not found", body = ErrorDto)
    ),
)]
pub async fn update_sponsor_invites(
    State(state): State<AppState>,
    session: Session,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSponsorInvitesDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Edit])
        .await?;

    let (ip_address, user_agent) = request_meta(&headers, &addr);

    let service = PersonService::new(&state.db);
    let person = service
        .update_quota(
            UpdateQuotaParam {
                person_id: id,
                invites_sent: payload.invites_sent,
                invites_used: payload.invites_used,
            },
            Some(account.id),
            ip_address,
            user_agent,
        )
        .await?;

    let (person, stats) = service
        .get_sponsor(person.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Sponsor not found".to_string()))?;

    Ok((StatusCode::OK, Json(person.into_sponsor_dto(stats))))
}

/// Get the top sponsors by used invites.
#[utoipa::path(
    get,
    path = "/api/sponsors/ranking",
    tag = SPONSOR_TAG,
    responses(
        (status = 200, description = "Top sponsors", body = Vec<SponsorRankingEntryDto>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn sponsor_ranking(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = PersonService::new(&state.db);
    let sponsors = service.ranking(RANKING_SIZE).await?;

    let dto: Vec<SponsorRankingEntryDto> = sponsors
        .into_iter()
        .enumerate()
        .map(|(i, person)| person.into_ranking_dto(i + 1))
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}
