use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub niche: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub invites_sent: i32,
    pub invites_used: i32,
    pub last_payment_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a person record. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePersonDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub niche: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}
