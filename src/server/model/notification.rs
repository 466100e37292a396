//! In-app notification domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::notification::NotificationDto;

/// What the notification is about. Admin-facing kinds have no person target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A sponsor's affiliate was approved.
    AffiliateApproved,
    /// An approval email could not be delivered.
    EmailFailed,
    /// The unused invite code pool is running low.
    CodesLow,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AffiliateApproved => "AFFILIATE_APPROVED",
            Self::EmailFailed => "EMAIL_FAILED",
            Self::CodesLow => "CODES_LOW",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub person_id: Option<Uuid>,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Self {
        Self {
            id: entity.id,
            person_id: entity.person_id,
            kind: entity.kind,
            title: entity.title,
            message: entity.message,
            data: entity.data,
            read: entity.read,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            person_id: self.person_id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            read: self.read,
            created_at: self.created_at,
        }
    }
}

/// Parameters for creating a notification.
#[derive(Debug, Clone)]
pub struct CreateNotificationParam {
    pub person_id: Option<Uuid>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}
