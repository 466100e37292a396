use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    model::{
        api::MessageDto,
        email::{
            CreateEmailTemplateDto, EmailSettingDto, EmailTemplateDto, TestEmailDto,
            UpdateEmailSettingDto, UpdateEmailTemplateDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::email::{
            CreateEmailTemplateParam, SendTemplateEmailParams, UpdateEmailTemplateParam,
        },
        service::email::{template::TemplateMailer, EmailAdminService},
        state::AppState,
    },
};

/// GET /api/admin/email-templates - List templates.
///
/// # Access Control
/// - `Admin`
pub async fn list_templates(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = EmailAdminService::new(&state.db);
    let templates = service.list_templates().await?;

    let dto: Vec<EmailTemplateDto> = templates.into_iter().map(|t| t.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// POST /api/admin/email-templates - Create a template.
///
/// # Access Control
/// - `Admin`
pub async fn create_template(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateEmailTemplateDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = EmailAdminService::new(&state.db);
    let template = service
        .create_template(CreateEmailTemplateParam {
            code: payload.code,
            name: payload.name,
            subject: payload.subject,
            body: payload.body,
            sender_name: payload.sender_name,
            sender_email: payload.sender_email,
            active: payload.active.unwrap_or(true),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(template.into_dto())))
}

/// PUT /api/admin/email-templates/{id} - Update a template.
///
/// # Access Control
/// - `Admin`
pub async fn update_template(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmailTemplateDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = EmailAdminService::new(&state.db);
    let template = service
        .update_template(
            id,
            UpdateEmailTemplateParam {
                name: payload.name,
                subject: payload.subject,
                body: payload.body,
                sender_name: payload.sender_name,
                sender_email: payload.sender_email,
                active: payload.active,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(template.into_dto())))
}

/// DELETE /api/admin/email-templates/{id} - Delete a template.
///
/// # Access Control
/// - `Admin`
pub async fn delete_template(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    EmailAdminService::new(&state.db).delete_template(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/email-settings - List mail settings (secrets redacted).
///
/// # Access Control
/// - `Admin`
pub async fn list_settings(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = EmailAdminService::new(&state.db);
    let settings = service.list_settings().await?;

    let dto: Vec<EmailSettingDto> = settings.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// PUT /api/admin/email-settings - Create or overwrite one setting.
///
/// # Access Control
/// - `Admin`
pub async fn update_setting(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateEmailSettingDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = EmailAdminService::new(&state.db);
    let setting = service.update_setting(&payload.key, &payload.value).await?;

    Ok((StatusCode::OK, Json(setting.into_dto())))
}

/// POST /api/admin/email-settings/test - Send a test email through the
/// configured SMTP settings and the given template.
///
/// # Access Control
/// - `Admin`
pub async fn send_test_email(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<TestEmailDto>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let variables = HashMap::from([
        ("name".to_string(), account.name.clone()),
        ("code".to_string(), "TEST0000".to_string()),
        (
            "invite_link".to_string(),
            state.config.community_invite_link.clone(),
        ),
        ("sponsor_name".to_string(), "Test Sponsor".to_string()),
    ]);

    TemplateMailer::new(&state.db)
        .send(SendTemplateEmailParams {
            template_code: payload.template_code,
            recipient_email: payload.recipient,
            recipient_name: Some(account.name),
            variables,
            affiliate_id: None,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Test email sent".to_string(),
        }),
    ))
}
