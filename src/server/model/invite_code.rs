//! Invite code domain model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::invite_code::InviteCodeDto;

/// Single-use community access token.
#[derive(Debug, Clone, PartialEq)]
pub struct InviteCode {
    pub id: Uuid,
    pub code: String,
    pub email: Option<String>,
    pub used: bool,
    pub assigned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl InviteCode {
    pub fn from_entity(entity: entity::invite_code::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            email: entity.email,
            used: entity.used,
            assigned_at: entity.assigned_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> InviteCodeDto {
        InviteCodeDto {
            id: self.id,
            code: self.code,
            email: self.email,
            used: self.used,
            assigned_at: self.assigned_at,
            created_at: self.created_at,
        }
    }
}

/// One page of invite codes.
#[derive(Debug, Clone)]
pub struct PaginatedInviteCodes {
    pub codes: Vec<InviteCode>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
