//! Audit trail domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Auditable privileged action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    ApproveAffiliate,
    RejectAffiliate,
    AssignCode,
    GenerateCodes,
    AdjustSponsorInvites,
    CreateAccount,
    UpdateAccount,
    DeleteAccount,
    AnonymizeData,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApproveAffiliate => "APPROVE_AFFILIATE",
            Self::RejectAffiliate => "REJECT_AFFILIATE",
            Self::AssignCode => "ASSIGN_CODE",
            Self::GenerateCodes => "GENERATE_CODES",
            Self::AdjustSponsorInvites => "ADJUST_SPONSOR_INVITES",
            Self::CreateAccount => "CREATE_ACCOUNT",
            Self::UpdateAccount => "UPDATE_ACCOUNT",
            Self::DeleteAccount => "DELETE_ACCOUNT",
            Self::AnonymizeData => "ANONYMIZE_DATA",
        }
    }
}

/// One audit entry to be persisted. `account_id` is `None` for actions taken
/// by the automated worker.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub account_id: Option<Uuid>,
    pub entity_type: String,
    pub entity_id: String,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Persisted audit row as read back from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLog {
    pub id: Uuid,
    pub action: String,
    pub account_id: Option<Uuid>,
    pub entity_type: String,
    pub entity_id: String,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn from_entity(entity: entity::audit_log::Model) -> Self {
        Self {
            id: entity.id,
            action: entity.action,
            account_id: entity.account_id,
            entity_type: entity.entity_type,
            entity_id: entity.entity_id,
            details: entity.details,
            ip_address: entity.ip_address,
            user_agent: entity.user_agent,
            created_at: entity.created_at,
        }
    }
}
