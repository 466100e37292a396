//! Email domain models: templates, SMTP settings, delivery log entries.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::model::email::{EmailSettingDto, EmailTemplateDto};

/// Setting keys that must never be returned in clear through the API.
pub const SECRET_SETTING_KEYS: &[&str] = &["smtp_password"];

/// Delivery state of a templated email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailLogStatus {
    Pending,
    Sent,
    Failed,
}

impl EmailLogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sent => "SENT",
            Self::Failed => "FAILED",
        }
    }
}

/// Configurable email template with `{{ variable }}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailTemplate {
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

impl EmailTemplate {
    pub fn from_entity(entity: entity::email_template::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            subject: entity.subject,
            body: entity.body,
            sender_name: entity.sender_name,
            sender_email: entity.sender_email,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> EmailTemplateDto {
        EmailTemplateDto {
            id: self.id,
            code: self.code,
            name: self.name,
            subject: self.subject,
            body: self.body,
            sender_name: self.sender_name,
            sender_email: self.sender_email,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for creating a template.
#[derive(Debug, Clone)]
pub struct CreateEmailTemplateParam {
    pub code: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub active: bool,
}

/// Partial template update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmailTemplateParam {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub active: Option<bool>,
}

/// One mail configuration entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailSetting {
    pub key: String,
    pub value: String,
    pub group: String,
    pub updated_at: DateTime<Utc>,
}

impl EmailSetting {
    pub fn from_entity(entity: entity::email_setting::Model) -> Self {
        Self {
            key: entity.key,
            value: entity.value,
            group: entity.group,
            updated_at: entity.updated_at,
        }
    }

    /// Converts to a DTO, redacting secret values.
    pub fn into_dto(self) -> EmailSettingDto {
        let value = if SECRET_SETTING_KEYS.contains(&self.key.as_str()) && !self.value.is_empty() {
            "[REDACTED]".to_string()
        } else {
            self.value
        };
        EmailSettingDto {
            key: self.key,
            value,
            group: self.group,
            updated_at: self.updated_at,
        }
    }
}

/// SMTP connection settings assembled from the `email_setting` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub user: String,
    pub password: String,
    pub sender_name: String,
    pub sender_email: String,
}

impl SmtpSettings {
    /// Assembles settings from raw key/value pairs.
    ///
    /// # Returns
    /// - `Some(SmtpSettings)` - Host, user and password are present; the rest
    ///   fall back to defaults (port 587, sender = smtp user)
    /// - `None` - A required key is missing or empty
    pub fn from_values(values: &HashMap<String, String>) -> Option<Self> {
        let host = values.get("smtp_host").cloned().unwrap_or_default();
        let user = values.get("smtp_user").cloned().unwrap_or_default();
        let password = values.get("smtp_password").cloned().unwrap_or_default();

        if host.is_empty() || user.is_empty() || password.is_empty() {
            return None;
        }

        let port = values
            .get("smtp_port")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(587);
        let secure = values.get("smtp_secure").map(|s| s == "true").unwrap_or(false);
        let sender_name = values
            .get("sender_name")
            .cloned()
            .unwrap_or_else(|| "Referral Program".to_string());
        let sender_email = values
            .get("sender_email")
            .cloned()
            .unwrap_or_else(|| user.clone());

        Some(Self {
            host,
            port,
            secure,
            user,
            password,
            sender_name,
            sender_email,
        })
    }
}

/// Parameters for one templated email delivery.
#[derive(Debug, Clone)]
pub struct SendTemplateEmailParams {
    pub template_code: String,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
    pub variables: HashMap<String, String>,
    pub affiliate_id: Option<Uuid>,
}

/// Parameters for inserting an email log row.
#[derive(Debug, Clone)]
pub struct CreateEmailLogParam {
    pub template_code: String,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
    pub subject: String,
    pub body: String,
    pub variables: serde_json::Value,
    pub status: EmailLogStatus,
    pub error: Option<String>,
    pub affiliate_id: Option<Uuid>,
    pub attempts: i32,
}
