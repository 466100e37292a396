use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Headline numbers for the admin landing page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardMetricsDto {
    pub total_affiliates: u64,
    pub pending_affiliates: u64,
    pub sent_affiliates: u64,
    pub rejected_affiliates: u64,
    pub total_sponsors: u64,
    pub available_codes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StateCountDto {
    pub state: String,
    pub count: u64,
}
