//! Invite code service.
//!
//! Owns the single-use code pool: batch generation, the conditional
//! assignment used by the approval workflow, rollback release, and pool
//! statistics. Assignment is optimistic-concurrency: the repository's
//! conditional UPDATE detects a lost race, which this service surfaces as
//! `ApprovalError::CodeConflict`.

use chrono::Utc;
use rand::Rng;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::invite_code::InviteCodeRepository,
    error::{approval::ApprovalError, AppError},
    model::{
        audit::{AuditAction, AuditEntry},
        invite_code::{InviteCode, PaginatedInviteCodes},
    },
    service::{audit::AuditService, notification::NotificationService},
};

/// Characters used in generated codes. Uppercase plus digits, like the codes
/// historically handed out to sponsors.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated code.
const CODE_LENGTH: usize = 8;

/// Maximum batch size for one generation request.
const MAX_GENERATE_QUANTITY: u32 = 1000;

/// Remaining-pool size below which an admin notification is raised.
const LOW_POOL_THRESHOLD: u64 = 10;

/// Rows per INSERT statement when persisting a generated batch.
const INSERT_BATCH_SIZE: usize = 100;

/// Service providing invite code pool operations.
pub struct InviteCodeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InviteCodeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Assigns an unused code to the given email.
    ///
    /// Picks the oldest unused code and flips it to used with a conditional
    /// UPDATE. When the pool is empty (or the selected code is claimed
    /// concurrently) the caller gets a typed error; when the pool is merely
    /// running low an admin notification is raised but assignment proceeds.
    ///
    /// # Arguments
    /// - `email` - Recipient the code is assigned to
    ///
    /// # Returns
    /// - `Ok(InviteCode)` - The assigned code
    /// - `Err(AppError::ApprovalErr(CodesExhausted))` - No unused codes left
    /// - `Err(AppError::ApprovalErr(CodeConflict))` - Lost the race for the selected code
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn assign(&self, email: &str) -> Result<InviteCode, AppError> {
        let repo = InviteCodeRepository::new(self.db);
        let notifications = NotificationService::new(self.db);

        let available = repo.count_available().await?;
        if available == 0 {
            tracing::error!("no invite codes available");
            notifications.notify_codes_low(0).await;
            return Err(ApprovalError::CodesExhausted.into());
        }
        if available <= LOW_POOL_THRESHOLD {
            notifications.notify_codes_low(available).await;
        }

        let Some(code) = repo.find_first_available().await? else {
            // The pool drained between the count and the select.
            tracing::error!("invite code pool drained concurrently");
            return Err(ApprovalError::CodesExhausted.into());
        };

        let now = Utc::now();
        if !repo.assign(code.id, email, now).await? {
            tracing::warn!(code_id = %code.id, "invite code claimed concurrently");
            return Err(ApprovalError::CodeConflict.into());
        }

        tracing::info!(code_id = %code.id, "invite code assigned");

        Ok(InviteCode {
            email: Some(email.to_string()),
            used: true,
            assigned_at: Some(now),
            ..code
        })
    }

    /// Releases a code back to the pool.
    ///
    /// Used to roll back an assignment when a later approval step fails.
    /// Release failures are logged but not propagated; the approval error
    /// that triggered the rollback is the one the caller needs to see.
    pub async fn release(&self, code_id: Uuid) {
        tracing::warn!(%code_id, "releasing invite code after rollback");

        let repo = InviteCodeRepository::new(self.db);
        if let Err(err) = repo.release(code_id).await {
            tracing::error!(%code_id, error = %err, "failed to release invite code");
        }
    }

    /// Generates a batch of unique codes.
    ///
    /// Codes are random 8-character strings over A-Z0-9, checked for
    /// uniqueness against both the batch under construction and the table,
    /// then inserted in chunks.
    ///
    /// # Arguments
    /// - `quantity` - Number of codes to create (1..=1000)
    /// - `account_id` - Acting operator, recorded in the audit trail
    ///
    /// # Returns
    /// - `Ok(u32)` - Number of codes created
    /// - `Err(AppError::BadRequest)` - Quantity out of range
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn generate(
        &self,
        quantity: u32,
        account_id: Option<Uuid>,
    ) -> Result<u32, AppError> {
        if quantity == 0 || quantity > MAX_GENERATE_QUANTITY {
            return Err(AppError::BadRequest(format!(
                "Quantity must be between 1 and {MAX_GENERATE_QUANTITY}"
            )));
        }

        let repo = InviteCodeRepository::new(self.db);

        let mut codes: Vec<String> = Vec::with_capacity(quantity as usize);
        while codes.len() < quantity as usize {
            let code = generate_code();
            if codes.contains(&code) || repo.code_exists(&code).await? {
                continue;
            }
            codes.push(code);
        }

        for chunk in codes.chunks(INSERT_BATCH_SIZE) {
            repo.insert_batch(chunk).await?;
        }

        AuditService::new(self.db)
            .log(AuditEntry {
                action: AuditAction::GenerateCodes,
                account_id,
                entity_type: "invite_code".to_string(),
                entity_id: "batch".to_string(),
                details: serde_json::json!({ "quantity": quantity }),
                ip_address: None,
                user_agent: None,
            })
            .await;

        tracing::info!(quantity, "invite codes generated");

        Ok(quantity)
    }

    /// Gets one page of codes, newest first.
    pub async fn list(&self, page: u64, per_page: u64) -> Result<PaginatedInviteCodes, AppError> {
        let repo = InviteCodeRepository::new(self.db);
        let (codes, total) = repo.get_all_paginated(page, per_page).await?;

        let total_pages = (total as f64 / per_page as f64).ceil() as u64;

        Ok(PaginatedInviteCodes {
            codes,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Pool statistics: total, available and used counts.
    pub async fn stats(&self) -> Result<(u64, u64, u64), AppError> {
        let repo = InviteCodeRepository::new(self.db);
        let total = repo.count_all().await?;
        let available = repo.count_available().await?;
        Ok((total, available, total - available))
    }
}

/// Generates one random code over the pool alphabet.
fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_use_pool_alphabet() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code
                .bytes()
                .all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn generated_codes_vary() {
        let first = generate_code();
        let distinct = (0..50).map(|_| generate_code()).any(|c| c != first);
        assert!(distinct);
    }
}
