//! SMTP delivery of database-configured templates.
//!
//! The mailer loads the active template, substitutes `{{ variable }}`
//! placeholders, reads SMTP settings from the `email_setting` table and sends
//! through lettre. Every delivery writes an `email_log` row: PENDING before
//! the send, then SENT or FAILED with the transport error.

use chrono::Utc;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{email_log::EmailLogRepository, email_setting::EmailSettingRepository,
        email_template::EmailTemplateRepository},
    error::{email::EmailError, AppError},
    model::email::{
        CreateEmailLogParam, EmailLogStatus, EmailTemplate, SendTemplateEmailParams, SmtpSettings,
    },
    util::template::render,
};

/// Setting keys read for SMTP delivery.
const SMTP_SETTING_KEYS: &[&str] = &[
    "smtp_host",
    "smtp_port",
    "smtp_secure",
    "smtp_user",
    "smtp_password",
    "sender_name",
    "sender_email",
];

/// Template-driven SMTP mailer.
pub struct TemplateMailer<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TemplateMailer<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Renders and sends one templated email.
    ///
    /// # Arguments
    /// - `params` - Template code, recipient, substitution variables and the
    ///   affiliate the delivery belongs to (for the log row)
    ///
    /// # Returns
    /// - `Ok(())` - Delivered; log row marked SENT
    /// - `Err(AppError::EmailErr(TemplateNotFound))` - No active template with that code
    /// - `Err(AppError::EmailErr(SmtpConfigIncomplete))` - Missing SMTP settings
    /// - `Err(AppError::EmailErr(_))` - Address, message or transport failure;
    ///   log row marked FAILED
    pub async fn send(&self, params: SendTemplateEmailParams) -> Result<(), AppError> {
        let template_repo = EmailTemplateRepository::new(self.db);
        let template = template_repo
            .find_active_by_code(&params.template_code)
            .await?
            .ok_or_else(|| EmailError::TemplateNotFound(params.template_code.clone()))?;

        let subject = render(&template.subject, &params.variables);
        let body = render(&template.body, &params.variables);

        let setting_repo = EmailSettingRepository::new(self.db);
        let values = setting_repo.get_values(SMTP_SETTING_KEYS).await?;
        let smtp =
            SmtpSettings::from_values(&values).ok_or(EmailError::SmtpConfigIncomplete)?;

        let log_repo = EmailLogRepository::new(self.db);
        let log_id = log_repo
            .insert(CreateEmailLogParam {
                template_code: params.template_code.clone(),
                recipient_email: params.recipient_email.clone(),
                recipient_name: params.recipient_name.clone(),
                subject: subject.clone(),
                body: body.clone(),
                variables: serde_json::to_value(&params.variables)
                    .unwrap_or(serde_json::Value::Null),
                status: EmailLogStatus::Pending,
                error: None,
                affiliate_id: params.affiliate_id,
                attempts: 1,
            })
            .await?;

        match self.deliver(&template, &smtp, &params, &subject, body).await {
            Ok(()) => {
                log_repo.mark_sent(log_id, Utc::now()).await?;
                tracing::info!(template = params.template_code, "templated email sent");
                Ok(())
            }
            Err(err) => {
                log_repo.mark_failed(log_id, &err.to_string()).await?;
                tracing::error!(
                    template = params.template_code,
                    error = %err,
                    "templated email failed"
                );
                Err(err.into())
            }
        }
    }

    /// Builds the message and pushes it through the SMTP transport.
    async fn deliver(
        &self,
        template: &EmailTemplate,
        smtp: &SmtpSettings,
        params: &SendTemplateEmailParams,
        subject: &str,
        body: String,
    ) -> Result<(), EmailError> {
        // Template-level sender overrides the global SMTP identity.
        let sender_name = template
            .sender_name
            .clone()
            .unwrap_or_else(|| smtp.sender_name.clone());
        let sender_email = template
            .sender_email
            .clone()
            .unwrap_or_else(|| smtp.sender_email.clone());

        let from = Mailbox::new(Some(sender_name), sender_email.parse()?);
        let to = Mailbox::new(
            params.recipient_name.clone(),
            params.recipient_email.parse()?,
        );

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        let transport = build_transport(smtp)?;
        transport.send(message).await?;

        Ok(())
    }
}

/// Builds the SMTP transport from the stored settings.
///
/// `smtp_secure = true` means implicit TLS (SMTPS); otherwise STARTTLS is
/// attempted on the configured port.
fn build_transport(
    smtp: &SmtpSettings,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
    let builder = if smtp.secure {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?
    };

    Ok(builder
        .port(smtp.port)
        .credentials(Credentials::new(smtp.user.clone(), smtp.password.clone()))
        .build())
}
