//! Dashboard statistics service.
//!
//! Aggregations are deliberately simple: fetch the relevant column and fold
//! in memory, except for status counts which group in SQL. The tables involved
//! are admin-dashboard sized.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use uuid::Uuid;

use crate::server::{
    data::{
        affiliate::AffiliateRepository, invite_code::InviteCodeRepository,
        person::PersonRepository,
    },
    error::AppError,
    model::{
        affiliate::{Affiliate, AffiliateStatus},
        dashboard::{DailyCount, StateCount, StatusBreakdown},
    },
};

/// Service computing dashboard aggregates.
pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Affiliate totals grouped by status.
    pub async fn affiliate_stats(&self) -> Result<StatusBreakdown, AppError> {
        let repo = AffiliateRepository::new(self.db);
        let counts = repo.count_by_status().await?;

        let mut breakdown = StatusBreakdown::default();
        for (status, count) in counts {
            let count = count as u64;
            breakdown.total += count;
            match AffiliateStatus::from_db(&status) {
                Ok(AffiliateStatus::Pending) => breakdown.pending += count,
                Ok(AffiliateStatus::Sent) => breakdown.sent += count,
                Ok(AffiliateStatus::Rejected) => breakdown.rejected += count,
                Ok(AffiliateStatus::AlreadyMember) => breakdown.already_member += count,
                Err(_) => tracing::warn!(status, "skipping unknown affiliate status"),
            }
        }

        Ok(breakdown)
    }

    /// Affiliate registrations per day over the last `days` days.
    pub async fn affiliates_per_day(&self, days: u32) -> Result<Vec<DailyCount>, AppError> {
        let repo = AffiliateRepository::new(self.db);
        let dates = repo.registration_dates().await?;
        Ok(fold_daily(dates, days))
    }

    /// Invite code assignments per day over the last `days` days.
    pub async fn codes_per_day(&self, days: u32) -> Result<Vec<DailyCount>, AppError> {
        let repo = InviteCodeRepository::new(self.db);
        let dates = repo.assigned_dates().await?;
        Ok(fold_daily(dates, days))
    }

    /// Sponsor sign-ups per day over the last `days` days.
    pub async fn sponsors_per_day(&self, days: u32) -> Result<Vec<DailyCount>, AppError> {
        let repo = PersonRepository::new(self.db);
        let dates = repo.sponsor_created_dates().await?;
        Ok(fold_daily(dates, days))
    }

    /// Most recently registered affiliates, with sponsor names resolved.
    pub async fn latest_affiliates(
        &self,
        limit: u64,
    ) -> Result<Vec<(Affiliate, Option<String>)>, AppError> {
        let repo = AffiliateRepository::new(self.db);
        let affiliates = repo.latest(limit).await?;

        let sponsor_ids: Vec<Uuid> = affiliates.iter().map(|a| a.sponsor_id).collect();
        let names: HashMap<Uuid, String> = PersonRepository::new(self.db)
            .names_by_ids(&sponsor_ids)
            .await?
            .into_iter()
            .collect();

        Ok(affiliates
            .into_iter()
            .map(|a| {
                let name = names.get(&a.sponsor_id).cloned();
                (a, name)
            })
            .collect())
    }

    /// Distribution of member affiliates by state (UF).
    ///
    /// Only affiliates that became members have a person record carrying a
    /// state; the rest are not counted.
    pub async fn affiliates_per_state(&self) -> Result<Vec<StateCount>, AppError> {
        let affiliate_repo = AffiliateRepository::new(self.db);
        let person_repo = PersonRepository::new(self.db);

        let person_ids = affiliate_repo.member_person_ids().await?;
        let states = person_repo.states_by_ids(&person_ids).await?;

        Ok(fold_states(states))
    }

    /// Distribution of sponsors by state (UF).
    pub async fn sponsors_per_state(&self) -> Result<Vec<StateCount>, AppError> {
        let repo = PersonRepository::new(self.db);
        let states = repo.sponsor_states().await?;
        Ok(fold_states(states))
    }

    /// Headline metrics for the admin landing page.
    pub async fn metrics(&self) -> Result<(StatusBreakdown, u64, u64), AppError> {
        let breakdown = self.affiliate_stats().await?;
        let sponsors = PersonRepository::new(self.db).count_sponsors().await?;
        let available_codes = InviteCodeRepository::new(self.db).count_available().await?;

        Ok((breakdown, sponsors, available_codes))
    }
}

/// Folds timestamps into per-day counts for the last `days` days, oldest
/// first. Days with no events are omitted, matching what the dashboard
/// charts expect.
fn fold_daily(dates: Vec<DateTime<Utc>>, days: u32) -> Vec<DailyCount> {
    let cutoff: NaiveDate = (Utc::now() - Duration::days(days as i64)).date_naive();

    let mut by_day: HashMap<NaiveDate, u64> = HashMap::new();
    for date in dates {
        let day = date.date_naive();
        if day >= cutoff {
            *by_day.entry(day).or_default() += 1;
        }
    }

    let mut counts: Vec<DailyCount> = by_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect();
    counts.sort_by_key(|c| c.date);
    counts
}

/// Folds state strings into sorted (state, count) pairs, highest count first.
fn fold_states(states: Vec<String>) -> Vec<StateCount> {
    let mut by_state: HashMap<String, u64> = HashMap::new();
    for state in states {
        if state.is_empty() {
            continue;
        }
        *by_state.entry(state).or_default() += 1;
    }

    let mut counts: Vec<StateCount> = by_state
        .into_iter()
        .map(|(state, count)| StateCount { state, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.state.cmp(&b.state)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_dates_into_days() {
        let now = Utc::now();
        let dates = vec![now, now, now - Duration::days(1)];

        let counts = fold_daily(dates, 30);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].date, (now - Duration::days(1)).date_naive());
        assert_eq!(counts[0].count, 1);
        assert_eq!(counts[1].date, now.date_naive());
        assert_eq!(counts[1].count, 2);
    }

    #[test]
    fn drops_dates_outside_window() {
        let now = Utc::now();
        let dates = vec![now, now - Duration::days(45)];

        let counts = fold_daily(dates, 30);

        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 1);
    }

    #[test]
    fn folds_states_by_frequency() {
        let states = vec![
            "SP".to_string(),
            "RJ".to_string(),
            "SP".to_string(),
            String::new(),
        ];

        let counts = fold_states(states);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].state, "SP");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].state, "RJ");
    }
}
