use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InviteCodeDto {
    pub id: Uuid,
    pub code: String,
    pub email: Option<String>,
    pub used: bool,
    pub assigned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedInviteCodesDto {
    pub codes: Vec<InviteCodeDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateCodesDto {
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateCodesResultDto {
    pub generated: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InviteCodeStatsDto {
    pub total: u64,
    pub available: u64,
    pub used: u64,
}
