use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    model::person::{PersonDto, UpdatePersonDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::person::UpdatePersonParam,
        service::person::PersonService,
        state::AppState,
    },
};

#[derive(Deserialize)]
pub struct PersonListParams {
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

/// GET /api/people - Search community members.
pub async fn list_people(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PersonListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = PersonService::new(&state.db);
    let people = service
        .search(params.search.as_deref(), params.limit.clamp(1, 500))
        .await?;

    let dto: Vec<PersonDto> = people.into_iter().map(|p| p.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// GET /api/people/{id} - Get one community member.
pub async fn get_person(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = PersonService::new(&state.db);
    let person = service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Person not found".to_string()))?;

    Ok((StatusCode::OK, Json(person.into_dto())))
}

/// PUT /api/people/{id} - Update contact data and active flag.
pub async fn update_person(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePersonDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Edit])
        .await?;

    let service = PersonService::new(&state.db);
    let person = service
        .update(
            id,
            UpdatePersonParam {
                name: payload.name,
                email: payload.email,
                cpf: payload.cpf,
                city: payload.city,
                state: payload.state,
                niche: payload.niche,
                phone: payload.phone,
                active: payload.active,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(person.into_dto())))
}
