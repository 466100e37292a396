use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::invite_code::InviteCodeDto;

/// Affiliate application as shown in admin listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AffiliateDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub status: String,
    pub sponsor_id: Uuid,
    /// Display name of the sponsoring person, when loaded.
    pub sponsor_name: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub email_sent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedAffiliatesDto {
    pub affiliates: Vec<AffiliateDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Payload for registering a new referral application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAffiliateDto {
    pub name: Option<String>,
    pub email: String,
    pub sponsor_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RejectAffiliateDto {
    pub reason: String,
}

/// Result of a manual approval: the updated affiliate, the code that was
/// assigned, and any non-fatal warnings collected along the way.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApprovalResultDto {
    pub affiliate: AffiliateDto,
    pub code: InviteCodeDto,
    pub email_sent: bool,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AffiliateStatsDto {
    pub total: u64,
    pub pending: u64,
    pub sent: u64,
    pub rejected: u64,
    pub already_member: u64,
}

/// One day's worth of counted events, keyed by ISO date (YYYY-MM-DD).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyCountDto {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyStatsDto {
    pub stats: Vec<DailyCountDto>,
    pub total: u64,
    pub days: u32,
}
