//! Person and sponsor service.
//!
//! People are community members; the sponsor views add per-sponsor affiliate
//! aggregates and quota management on top.

use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use uuid::Uuid;

use crate::server::{
    data::{affiliate::AffiliateRepository, person::PersonRepository},
    error::AppError,
    model::{
        affiliate::{Affiliate, AffiliateStatus},
        audit::{AuditAction, AuditEntry},
        person::{Person, SponsorAffiliateStats, UpdatePersonParam, UpdateQuotaParam},
    },
    service::audit::AuditService,
};

/// Service providing business logic for people and sponsors.
pub struct PersonService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PersonService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a person by id.
    pub async fn get(&self, id: Uuid) -> Result<Option<Person>, AppError> {
        let repo = PersonRepository::new(self.db);
        let person = repo.find_by_id(id).await?;
        Ok(person)
    }

    /// Searches people by name, email or document substring.
    pub async fn search(
        &self,
        search: Option<&str>,
        limit: u64,
    ) -> Result<Vec<Person>, AppError> {
        let repo = PersonRepository::new(self.db);
        let people = repo.search(search, limit).await?;
        Ok(people)
    }

    /// Applies a partial update to a person.
    ///
    /// An email change is rejected when another person already uses the new
    /// address (the column is unique; this check turns the constraint
    /// violation into a friendly 400).
    ///
    /// # Returns
    /// - `Ok(Person)` - Updated person
    /// - `Err(AppError::BadRequest)` - Email already in use
    /// - `Err(AppError::NotFound)` - No person with that id
    pub async fn update(&self, id: Uuid, param: UpdatePersonParam) -> Result<Person, AppError> {
        let repo = PersonRepository::new(self.db);

        if let Some(email) = &param.email {
            if let Some(existing) = repo.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::BadRequest(
                        "Email already belongs to another person".to_string(),
                    ));
                }
            }
        }

        let person = repo
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Person not found".to_string()))?;

        Ok(person)
    }

    /// Gets sponsors with their per-status affiliate counts.
    ///
    /// One pass over the (sponsor_id, status) pairs builds the aggregate
    /// map; sponsors without affiliates get zeroed stats.
    pub async fn list_sponsors(
        &self,
        limit: u64,
    ) -> Result<Vec<(Person, SponsorAffiliateStats)>, AppError> {
        let person_repo = PersonRepository::new(self.db);
        let affiliate_repo = AffiliateRepository::new(self.db);

        let sponsors = person_repo.list_sponsors(limit).await?;
        let stats = fold_sponsor_stats(affiliate_repo.sponsor_status_pairs().await?);

        Ok(sponsors
            .into_iter()
            .map(|sponsor| {
                let sponsor_stats = stats.get(&sponsor.id).copied().unwrap_or_default();
                (sponsor, sponsor_stats)
            })
            .collect())
    }

    /// Gets one sponsor with their affiliate counts.
    pub async fn get_sponsor(
        &self,
        id: Uuid,
    ) -> Result<Option<(Person, SponsorAffiliateStats)>, AppError> {
        let person_repo = PersonRepository::new(self.db);

        let Some(sponsor) = person_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let affiliate_repo = AffiliateRepository::new(self.db);
        let stats = fold_sponsor_stats(affiliate_repo.sponsor_status_pairs().await?)
            .get(&id)
            .copied()
            .unwrap_or_default();

        Ok(Some((sponsor, stats)))
    }

    /// Gets all affiliates referred by one sponsor.
    pub async fn sponsor_affiliates(&self, sponsor_id: Uuid) -> Result<Vec<Affiliate>, AppError> {
        let repo = AffiliateRepository::new(self.db);
        let affiliates = repo.list_by_sponsor(sponsor_id).await?;
        Ok(affiliates)
    }

    /// Overwrites a sponsor's quota counters.
    ///
    /// # Returns
    /// - `Ok(Person)` - Sponsor with updated counters
    /// - `Err(AppError::BadRequest)` - Negative counters or used > sent
    /// - `Err(AppError::NotFound)` - No person with that id
    pub async fn update_quota(
        &self,
        param: UpdateQuotaParam,
        account_id: Option<Uuid>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<Person, AppError> {
        if param.invites_sent < 0 || param.invites_used < 0 {
            return Err(AppError::BadRequest(
                "Invite counters cannot be negative".to_string(),
            ));
        }
        if param.invites_used > param.invites_sent {
            return Err(AppError::BadRequest(
                "Used invites cannot exceed sent invites".to_string(),
            ));
        }

        let repo = PersonRepository::new(self.db);
        let person_id = param.person_id;

        if !repo.update_quota(param.clone()).await? {
            return Err(AppError::NotFound("Sponsor not found".to_string()));
        }

        AuditService::new(self.db)
            .log(AuditEntry {
                action: AuditAction::AdjustSponsorInvites,
                account_id,
                entity_type: "sponsor".to_string(),
                entity_id: person_id.to_string(),
                details: serde_json::json!({
                    "invites_sent": param.invites_sent,
                    "invites_used": param.invites_used,
                }),
                ip_address,
                user_agent,
            })
            .await;

        let person = repo
            .find_by_id(person_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Sponsor not found".to_string()))?;

        Ok(person)
    }

    /// Gets the top sponsors by used invites.
    pub async fn ranking(&self, limit: u64) -> Result<Vec<Person>, AppError> {
        let repo = PersonRepository::new(self.db);
        let sponsors = repo.ranking(limit).await?;
        Ok(sponsors)
    }
}

/// Folds (sponsor_id, status) pairs into per-sponsor aggregates.
fn fold_sponsor_stats(pairs: Vec<(Uuid, String)>) -> HashMap<Uuid, SponsorAffiliateStats> {
    let mut stats: HashMap<Uuid, SponsorAffiliateStats> = HashMap::new();

    for (sponsor_id, status) in pairs {
        let entry = stats.entry(sponsor_id).or_default();
        entry.total += 1;

        match AffiliateStatus::from_db(&status) {
            Ok(AffiliateStatus::Pending) => entry.pending += 1,
            Ok(AffiliateStatus::Sent) => entry.sent += 1,
            Ok(AffiliateStatus::Rejected) => entry.rejected += 1,
            Ok(AffiliateStatus::AlreadyMember) => {}
            Err(_) => tracing::warn!(%sponsor_id, status, "skipping unknown affiliate status"),
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_pairs_per_sponsor() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let pairs = vec![
            (a, "PENDING".to_string()),
            (a, "SENT".to_string()),
            (a, "SENT".to_string()),
            (b, "REJECTED".to_string()),
        ];

        let stats = fold_sponsor_stats(pairs);

        let a_stats = stats.get(&a).unwrap();
        assert_eq!(a_stats.total, 3);
        assert_eq!(a_stats.pending, 1);
        assert_eq!(a_stats.sent, 2);
        assert_eq!(a_stats.rejected, 0);

        let b_stats = stats.get(&b).unwrap();
        assert_eq!(b_stats.total, 1);
        assert_eq!(b_stats.rejected, 1);
    }

    #[test]
    fn unknown_status_counts_toward_total_only() {
        let a = Uuid::new_v4();
        let stats = fold_sponsor_stats(vec![(a, "bogus".to_string())]);

        let a_stats = stats.get(&a).unwrap();
        assert_eq!(a_stats.total, 1);
        assert_eq!(a_stats.pending + a_stats.sent + a_stats.rejected, 0);
    }
}
