use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Sponsor row for the admin listing: person data plus invite quota and
/// per-status affiliate counts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SponsorDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub cpf: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub niche: Option<String>,
    pub active: bool,
    pub invites_sent: i32,
    pub invites_used: i32,
    pub invites_available: i32,
    pub total_affiliates: u64,
    pub pending_affiliates: u64,
    pub sent_affiliates: u64,
    pub rejected_affiliates: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateSponsorInvitesDto {
    pub invites_sent: i32,
    pub invites_used: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SponsorRankingEntryDto {
    pub rank: usize,
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub invites_used: i32,
    pub invites_available: i32,
}
