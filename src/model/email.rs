use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmailTemplateDto {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEmailTemplateDto {
    pub code: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateEmailTemplateDto {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub active: Option<bool>,
}

/// Mail configuration entry. Secret values come back redacted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmailSettingDto {
    pub key: String,
    pub value: String,
    pub group: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateEmailSettingDto {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestEmailDto {
    pub template_code: String,
    pub recipient: String,
}
