//! Email services.
//!
//! Two delivery paths coexist, matching how the program historically ran:
//!
//! - `webhook` - JSON notifications to an external automation endpoint, with
//!   bounded retries. Used by manual approvals and rejections.
//! - `template` - SMTP delivery of database-configured templates. Used by the
//!   automated worker and the admin test-send endpoint.
//!
//! This module also hosts `EmailAdminService`, the thin orchestration behind
//! the template/settings admin endpoints.

pub mod template;
pub mod webhook;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{email_setting::EmailSettingRepository, email_template::EmailTemplateRepository},
    error::AppError,
    model::email::{
        CreateEmailTemplateParam, EmailSetting, EmailTemplate, UpdateEmailTemplateParam,
    },
};

/// Service behind the email template and settings admin endpoints.
pub struct EmailAdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmailAdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all templates ordered by name.
    pub async fn list_templates(&self) -> Result<Vec<EmailTemplate>, AppError> {
        let repo = EmailTemplateRepository::new(self.db);
        let templates = repo.list_all().await?;
        Ok(templates)
    }

    /// Creates a template.
    ///
    /// # Returns
    /// - `Ok(EmailTemplate)` - The created template
    /// - `Err(AppError::BadRequest)` - A template with that code already exists
    pub async fn create_template(
        &self,
        param: CreateEmailTemplateParam,
    ) -> Result<EmailTemplate, AppError> {
        let repo = EmailTemplateRepository::new(self.db);

        if repo.find_active_by_code(&param.code).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "A template with code \"{}\" already exists",
                param.code
            )));
        }

        let template = repo.create(param).await?;
        Ok(template)
    }

    /// Applies a partial update to a template.
    pub async fn update_template(
        &self,
        id: Uuid,
        param: UpdateEmailTemplateParam,
    ) -> Result<EmailTemplate, AppError> {
        let repo = EmailTemplateRepository::new(self.db);
        let template = repo
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Email template not found".to_string()))?;
        Ok(template)
    }

    /// Deletes a template.
    pub async fn delete_template(&self, id: Uuid) -> Result<(), AppError> {
        let repo = EmailTemplateRepository::new(self.db);
        if !repo.delete(id).await? {
            return Err(AppError::NotFound("Email template not found".to_string()));
        }
        Ok(())
    }

    /// Gets every mail setting. Secret values are redacted at DTO conversion.
    pub async fn list_settings(&self) -> Result<Vec<EmailSetting>, AppError> {
        let repo = EmailSettingRepository::new(self.db);
        let settings = repo.list_all().await?;
        Ok(settings)
    }

    /// Creates or overwrites a setting, deriving its display group from the
    /// key prefix.
    pub async fn update_setting(&self, key: &str, value: &str) -> Result<EmailSetting, AppError> {
        let repo = EmailSettingRepository::new(self.db);
        let setting = repo.upsert(key, value, group_for_key(key)).await?;
        Ok(setting)
    }
}

/// Display group for a setting key.
fn group_for_key(key: &str) -> &'static str {
    if key.starts_with("smtp_") || key.starts_with("sender_") {
        "smtp"
    } else if key.starts_with("worker_") {
        "worker"
    } else {
        "general"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_keys_by_prefix() {
        assert_eq!(group_for_key("smtp_host"), "smtp");
        assert_eq!(group_for_key("sender_email"), "smtp");
        assert_eq!(group_for_key("worker_enabled"), "worker");
        assert_eq!(group_for_key("community_invite_link"), "general");
    }
}
