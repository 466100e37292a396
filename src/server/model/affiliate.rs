//! Affiliate domain models and parameters.
//!
//! Provides the affiliate domain model, the status state machine, and the
//! parameter types used by the approval and rejection workflows.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::model::affiliate::AffiliateDto;
use crate::server::model::invite_code::InviteCode;

/// Lifecycle state of a referral application.
///
/// The only legal transitions are `Pending -> Sent` (approval),
/// `Pending -> Rejected` (rejection) and `Pending -> AlreadyMember`
/// (worker detected the applicant is already in the community).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffiliateStatus {
    Pending,
    Sent,
    Rejected,
    AlreadyMember,
}

impl AffiliateStatus {
    /// Canonical database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sent => "SENT",
            Self::Rejected => "REJECTED",
            Self::AlreadyMember => "ALREADY_MEMBER",
        }
    }

    /// Parses a stored status string at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(AffiliateStatus)` - Recognized status value
    /// - `Err(DbErr)` - The row holds a value outside the state machine
    pub fn from_db(value: &str) -> Result<Self, DbErr> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "SENT" => Ok(Self::Sent),
            "REJECTED" => Ok(Self::Rejected),
            "ALREADY_MEMBER" => Ok(Self::AlreadyMember),
            other => Err(DbErr::Custom(format!(
                "unknown affiliate status '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for AffiliateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Referral application with sponsor linkage and delivery bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Affiliate {
    pub id: Uuid,
    /// Name as submitted on the application form, if any.
    pub name: Option<String>,
    /// Contact email the invite code is delivered to.
    pub email: String,
    pub sponsor_id: Uuid,
    /// Set once the applicant shows up in the member table.
    pub person_id: Option<Uuid>,
    pub status: AffiliateStatus,
    pub registered_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub email_sent: bool,
    pub email_sent_at: Option<DateTime<Utc>>,
}

impl Affiliate {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Affiliate)` - The converted domain model
    /// - `Err(DbErr)` - The stored status string is not a known state
    pub fn from_entity(entity: entity::affiliate::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            sponsor_id: entity.sponsor_id,
            person_id: entity.person_id,
            status: AffiliateStatus::from_db(&entity.status)?,
            registered_at: entity.registered_at,
            approved_at: entity.approved_at,
            email_sent: entity.email_sent,
            email_sent_at: entity.email_sent_at,
        })
    }

    /// Converts the domain model to a DTO, attaching the sponsor's display
    /// name when the caller has it loaded.
    pub fn into_dto(self, sponsor_name: Option<String>) -> AffiliateDto {
        AffiliateDto {
            id: self.id,
            name: self.name,
            email: self.email,
            status: self.status.as_str().to_string(),
            sponsor_id: self.sponsor_id,
            sponsor_name,
            registered_at: self.registered_at,
            approved_at: self.approved_at,
            email_sent: self.email_sent,
        }
    }
}

/// Parameters for registering a new referral application.
#[derive(Debug, Clone)]
pub struct CreateAffiliateParam {
    pub name: Option<String>,
    pub email: String,
    pub sponsor_id: Uuid,
}

/// How the approval email is delivered.
///
/// Manual approvals go through the notification webhook; the automated worker
/// sends through the database-driven template mailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDelivery {
    Webhook,
    TemplateMail,
}

/// Parameters for the approval workflow.
#[derive(Debug, Clone)]
pub struct ApproveAffiliateParams {
    pub affiliate_id: Uuid,
    /// Acting operator; `None` for the automated worker.
    pub account_id: Option<Uuid>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub delivery: ApprovalDelivery,
}

/// Parameters for the rejection workflow.
#[derive(Debug, Clone)]
pub struct RejectAffiliateParams {
    pub affiliate_id: Uuid,
    pub reason: String,
    pub account_id: Option<Uuid>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Result of a successful approval.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    pub affiliate: Affiliate,
    pub code: InviteCode,
    pub email_sent: bool,
    /// Non-fatal problems encountered after the point of no return
    /// (counter increment, notification or email failures).
    pub warnings: Vec<String>,
}

/// Filter and paging parameters for the affiliate listing.
#[derive(Debug, Clone)]
pub struct ListAffiliatesParam {
    pub status: Option<AffiliateStatus>,
    pub page: u64,
    pub per_page: u64,
}

/// One page of affiliates with the sponsor names already resolved.
#[derive(Debug, Clone)]
pub struct PaginatedAffiliates {
    pub affiliates: Vec<(Affiliate, Option<String>)>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
