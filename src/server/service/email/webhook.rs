//! Webhook notification delivery with bounded retries.
//!
//! Approval notifications POST a JSON payload to an external automation
//! endpoint. Delivery is retried up to three times with increasing delays and
//! a five-second timeout per attempt; when every attempt fails, an
//! admin-facing notification is raised so the failure is visible without
//! grepping logs. Rejection notifications are single-shot.

use sea_orm::DatabaseConnection;
use std::time::Duration;

use crate::server::{
    config::Config,
    error::{email::EmailError, AppError},
    model::{affiliate::Affiliate, invite_code::InviteCode, person::Person},
    service::notification::NotificationService,
};

/// Total delivery attempts for approval notifications.
const MAX_ATTEMPTS: usize = 3;

/// Delay before retry N, in milliseconds.
const RETRY_DELAYS_MS: [u64; 3] = [1_000, 3_000, 10_000];

/// Per-attempt request timeout.
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Webhook notifier for approval and rejection events.
pub struct WebhookNotifier<'a> {
    db: &'a DatabaseConnection,
    http: reqwest::Client,
    config: &'a Config,
}

impl<'a> WebhookNotifier<'a> {
    pub fn new(db: &'a DatabaseConnection, http: reqwest::Client, config: &'a Config) -> Self {
        Self { db, http, config }
    }

    /// Sends the approval notification, retrying on failure.
    ///
    /// # Returns
    /// - `Ok(())` - An attempt succeeded
    /// - `Err(AppError::EmailErr(WebhookNotConfigured))` - No URL configured
    /// - `Err(AppError::EmailErr(RetriesExhausted))` - Every attempt failed;
    ///   an admin notification has been created
    pub async fn send_approval(
        &self,
        affiliate: &Affiliate,
        sponsor: &Person,
        code: &InviteCode,
    ) -> Result<(), AppError> {
        let Some(url) = &self.config.approval_webhook_url else {
            tracing::warn!("APPROVAL_WEBHOOK_URL not configured; skipping approval email");
            return Err(EmailError::WebhookNotConfigured.into());
        };

        let affiliate_name = affiliate.name.clone().unwrap_or_default();
        let payload = serde_json::json!({
            "type": "AFFILIATE_APPROVED",
            "affiliate": {
                "name": affiliate_name,
                "email": affiliate.email,
                "code": code.code,
                "invite_link": self.config.community_invite_link,
            },
            "sponsor": {
                "name": sponsor.name,
                "email": sponsor.email,
            },
        });

        tracing::info!(affiliate_id = %affiliate.id, code_id = %code.id, "sending approval email");

        for attempt in 0..MAX_ATTEMPTS {
            match self.post(url, &payload).await {
                Ok(status) if status.is_success() => {
                    tracing::info!(attempt = attempt + 1, "approval email sent");
                    return Ok(());
                }
                Ok(status) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        status = status.as_u16(),
                        "approval email attempt rejected"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        error = %err,
                        "approval email attempt failed"
                    );
                }
            }

            if attempt < MAX_ATTEMPTS - 1 {
                tokio::time::sleep(Duration::from_millis(RETRY_DELAYS_MS[attempt])).await;
            }
        }

        tracing::error!(
            affiliate_id = %affiliate.id,
            max_attempts = MAX_ATTEMPTS,
            "approval email failed after all attempts"
        );

        NotificationService::new(self.db)
            .notify_email_failure(&affiliate_name, &affiliate.email, &code.code)
            .await;

        Err(EmailError::RetriesExhausted(MAX_ATTEMPTS).into())
    }

    /// Sends the rejection notification. Single attempt; rejections are not
    /// time-critical and the reason stays in the audit log regardless.
    ///
    /// # Returns
    /// - `Ok(())` - Delivered
    /// - `Err(AppError::EmailErr(WebhookNotConfigured))` - No URL configured
    /// - `Err(AppError)` - Request failed or endpoint returned an error status
    pub async fn send_rejection(&self, affiliate: &Affiliate, reason: &str) -> Result<(), AppError> {
        let Some(url) = &self.config.rejection_webhook_url else {
            tracing::warn!("REJECTION_WEBHOOK_URL not configured; skipping rejection email");
            return Err(EmailError::WebhookNotConfigured.into());
        };

        let payload = serde_json::json!({
            "type": "AFFILIATE_REJECTED",
            "affiliate": {
                "name": affiliate.name.clone().unwrap_or_default(),
                "email": affiliate.email,
            },
            "reason": reason,
        });

        let status = self.post(url, &payload).await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "rejection email rejected by endpoint");
            return Err(AppError::InternalError(format!(
                "Rejection webhook returned status {status}"
            )));
        }

        tracing::info!(affiliate_id = %affiliate.id, "rejection email sent");

        Ok(())
    }

    async fn post(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<reqwest::StatusCode, reqwest::Error> {
        let response = self
            .http
            .post(url)
            .json(payload)
            .timeout(ATTEMPT_TIMEOUT)
            .send()
            .await?;

        Ok(response.status())
    }
}
