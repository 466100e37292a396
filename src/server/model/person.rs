//! Person domain models and parameters.
//!
//! People are community members; any person with a nonzero invite quota acts
//! as a sponsor. Sponsor-specific views carry aggregate affiliate counts on
//! top of the base person data.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::model::{
    person::PersonDto,
    sponsor::{SponsorDto, SponsorRankingEntryDto},
};

/// Community member with invite quota bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
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

impl Person {
    /// Remaining invite balance. Never reported below zero even if the
    /// counters were adjusted inconsistently by hand.
    pub fn invites_available(&self) -> i32 {
        (self.invites_sent - self.invites_used).max(0)
    }

    pub fn from_entity(entity: entity::person::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            cpf: entity.cpf,
            birth_date: entity.birth_date,
            sex: entity.sex,
            city: entity.city,
            state: entity.state,
            niche: entity.niche,
            phone: entity.phone,
            active: entity.active,
            invites_sent: entity.invites_sent,
            invites_used: entity.invites_used,
            last_payment_at: entity.last_payment_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> PersonDto {
        PersonDto {
            id: self.id,
            name: self.name,
            email: self.email,
            cpf: self.cpf,
            birth_date: self.birth_date,
            sex: self.sex,
            city: self.city,
            state: self.state,
            niche: self.niche,
            phone: self.phone,
            active: self.active,
            invites_sent: self.invites_sent,
            invites_used: self.invites_used,
            last_payment_at: self.last_payment_at,
            created_at: self.created_at,
        }
    }

    /// Converts to the sponsor listing DTO with aggregate affiliate counts.
    pub fn into_sponsor_dto(self, stats: SponsorAffiliateStats) -> SponsorDto {
        let invites_available = self.invites_available();
        SponsorDto {
            id: self.id,
            name: self.name,
            email: self.email,
            cpf: self.cpf,
            city: self.city,
            state: self.state,
            niche: self.niche,
            active: self.active,
            invites_sent: self.invites_sent,
            invites_used: self.invites_used,
            invites_available,
            total_affiliates: stats.total,
            pending_affiliates: stats.pending,
            sent_affiliates: stats.sent,
            rejected_affiliates: stats.rejected,
            created_at: self.created_at,
        }
    }

    pub fn into_ranking_dto(self, rank: usize) -> SponsorRankingEntryDto {
        let invites_available = self.invites_available();
        SponsorRankingEntryDto {
            rank,
            id: self.id,
            name: self.name,
            email: self.email,
            invites_used: self.invites_used,
            invites_available,
        }
    }
}

/// Per-sponsor affiliate counts grouped by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SponsorAffiliateStats {
    pub total: u64,
    pub pending: u64,
    pub sent: u64,
    pub rejected: u64,
}

/// Partial person update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePersonParam {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub niche: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

/// Quota adjustment for a sponsor. Validated so `invites_used` can never
/// exceed `invites_sent`.
#[derive(Debug, Clone)]
pub struct UpdateQuotaParam {
    pub person_id: Uuid,
    pub invites_sent: i32,
    pub invites_used: i32,
}
