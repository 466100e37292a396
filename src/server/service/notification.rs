//! In-app notification service.
//!
//! Creates sponsor-facing and admin-facing notifications and serves the
//! notification inbox of the admin surface.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::notification::{CreateNotificationParam, Notification, NotificationKind},
};

/// Service providing in-app notification operations.
pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a notification.
    pub async fn create(&self, param: CreateNotificationParam) -> Result<Notification, AppError> {
        let repo = NotificationRepository::new(self.db);
        let notification = repo.insert(param).await?;
        Ok(notification)
    }

    /// Notifies a sponsor that one of their affiliates was approved.
    pub async fn notify_sponsor_approved(
        &self,
        sponsor_id: Uuid,
        affiliate_name: &str,
    ) -> Result<Notification, AppError> {
        self.create(CreateNotificationParam {
            person_id: Some(sponsor_id),
            kind: NotificationKind::AffiliateApproved,
            title: "New affiliate approved".to_string(),
            message: format!("{affiliate_name} was approved and added to your network!"),
            data: None,
        })
        .await
    }

    /// Creates an admin-facing notification for a failed approval email.
    ///
    /// Best-effort: failures are logged and swallowed, matching the audit
    /// service contract. This runs at the tail of an approval that must not
    /// be rolled back.
    pub async fn notify_email_failure(
        &self,
        affiliate_name: &str,
        affiliate_email: &str,
        code: &str,
    ) {
        let result = self
            .create(CreateNotificationParam {
                person_id: None,
                kind: NotificationKind::EmailFailed,
                title: "Approval email failed".to_string(),
                message: format!("Could not deliver the approval email for {affiliate_name} ({code})"),
                data: Some(serde_json::json!({
                    "affiliate_name": affiliate_name,
                    "affiliate_email": affiliate_email,
                    "code": code,
                })),
            })
            .await;

        if let Err(err) = result {
            tracing::error!(error = %err, "failed to create email-failure notification");
        }
    }

    /// Creates an admin-facing notification about a low or empty code pool.
    ///
    /// Best-effort, same as `notify_email_failure`.
    pub async fn notify_codes_low(&self, available: u64) {
        let (title, message) = if available == 0 {
            (
                "Invite codes exhausted".to_string(),
                "There are no unused invite codes left; approvals are blocked".to_string(),
            )
        } else {
            (
                "Invite codes running low".to_string(),
                format!("Only {available} unused invite codes remain"),
            )
        };

        let result = self
            .create(CreateNotificationParam {
                person_id: None,
                kind: NotificationKind::CodesLow,
                title,
                message,
                data: Some(serde_json::json!({ "available": available })),
            })
            .await;

        if let Err(err) = result {
            tracing::error!(error = %err, "failed to create code-pool notification");
        }
    }

    /// Gets unread notifications, newest first.
    pub async fn list_unread(&self, limit: u64) -> Result<Vec<Notification>, AppError> {
        let repo = NotificationRepository::new(self.db);
        let notifications = repo.list_unread(limit).await?;
        Ok(notifications)
    }

    /// Marks a notification as read.
    pub async fn mark_read(&self, id: Uuid) -> Result<(), AppError> {
        let repo = NotificationRepository::new(self.db);
        if !repo.mark_read(id).await? {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }
        Ok(())
    }

    /// Counts unread notifications.
    pub async fn unread_count(&self) -> Result<u64, AppError> {
        let repo = NotificationRepository::new(self.db);
        let count = repo.unread_count().await?;
        Ok(count)
    }
}
