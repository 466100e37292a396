use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    model::account::{AccountDto, ChangePasswordDto, CreateAccountDto, UpdateAccountDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            account::{CreateAccountParam, Role, UpdateAccountParam},
            audit::{AuditAction, AuditEntry},
        },
        service::{account::AccountService, audit::AuditService},
        state::AppState,
    },
};

/// GET /api/accounts - List dashboard operators.
///
/// # Access Control
/// - `Admin`
pub async fn list_accounts(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = AccountService::new(&state.db);
    let accounts = service.list_all().await?;

    let dto: Vec<AccountDto> = accounts.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// POST /api/accounts - Create a dashboard operator.
///
/// # Access Control
/// - `Admin`
pub async fn create_account(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateAccountDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let roles = parse_roles(&payload.roles)?;

    let service = AccountService::new(&state.db);
    let account = service
        .create(CreateAccountParam {
            name: payload.name.unwrap_or_else(|| payload.email.clone()),
            email: payload.email,
            password: payload.password,
            roles,
        })
        .await?;

    AuditService::new(&state.db)
        .log(AuditEntry {
            action: AuditAction::CreateAccount,
            account_id: Some(actor.id),
            entity_type: "account".to_string(),
            entity_id: account.id.to_string(),
            details: serde_json::json!({ "roles": payload.roles }),
            ip_address: None,
            user_agent: None,
        })
        .await;

    Ok((StatusCode::CREATED, Json(account.into_dto())))
}

/// PUT /api/accounts/{id} - Update name and/or roles.
///
/// # Access Control
/// - `Admin`
pub async fn update_account(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAccountDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let roles = payload.roles.as_deref().map(parse_roles).transpose()?;

    let service = AccountService::new(&state.db);
    let account = service
        .update(UpdateAccountParam {
            account_id: id,
            name: payload.name,
            roles,
        })
        .await?;

    AuditService::new(&state.db)
        .log(AuditEntry {
            action: AuditAction::UpdateAccount,
            account_id: Some(actor.id),
            entity_type: "account".to_string(),
            entity_id: id.to_string(),
            details: serde_json::json!({ "roles": payload.roles }),
            ip_address: None,
            user_agent: None,
        })
        .await;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

/// DELETE /api/accounts/{id} - Delete an operator account.
///
/// Self-deletion is rejected so an admin cannot lock everyone out by
/// removing the last working account mid-session.
///
/// # Access Control
/// - `Admin`
pub async fn delete_account(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    if actor.id == id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    let service = AccountService::new(&state.db);
    service.delete(id).await?;

    AuditService::new(&state.db)
        .log(AuditEntry {
            action: AuditAction::DeleteAccount,
            account_id: Some(actor.id),
            entity_type: "account".to_string(),
            entity_id: id.to_string(),
            details: serde_json::json!({}),
            ip_address: None,
            user_agent: None,
        })
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/accounts/change-password - Change own password, or reset
/// someone else's as an admin.
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = AccountService::new(&state.db);

    match payload.target_account_id {
        Some(target) if target != actor.id => {
            if !actor.is_admin() {
                return Err(crate::server::error::auth::AuthError::AccessDenied(
                    actor.id,
                    "only admins may reset another account's password".to_string(),
                )
                .into());
            }
            service.reset_password(target, &payload.new_password).await?;
        }
        _ => {
            let current = payload.current_password.as_deref().ok_or_else(|| {
                AppError::BadRequest("Current password is required".to_string())
            })?;
            service
                .change_own_password(&actor, current, &payload.new_password)
                .await?;
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Parses API role strings into domain roles.
fn parse_roles(values: &[String]) -> Result<Vec<Role>, AppError> {
    let mut invalid = Vec::new();
    let mut roles = Vec::new();

    for value in values {
        match Role::parse(value) {
            Ok(role) => roles.push(role),
            Err(v) => invalid.push(v),
        }
    }

    if !invalid.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Invalid roles: {}",
            invalid.join(", ")
        )));
    }

    Ok(roles)
}
