//! Affiliate service: registration, listing and the approval/rejection
//! workflows.
//!
//! Approval is the one flow with real partial-failure handling. It is not a
//! database transaction; atomicity of the code assignment comes from the
//! conditional UPDATE in the repository, and everything up to the affiliate
//! status flip is rolled back by releasing the code. Past that point failures
//! downgrade to warnings: the approval stands even when the counter bump,
//! audit row, email or sponsor notification fail.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use uuid::Uuid;

use crate::server::{
    config::Config,
    data::{affiliate::AffiliateRepository, person::PersonRepository},
    error::{approval::ApprovalError, AppError},
    model::{
        affiliate::{
            Affiliate, AffiliateStatus, ApprovalDelivery, ApprovalOutcome,
            ApproveAffiliateParams, CreateAffiliateParam, ListAffiliatesParam,
            PaginatedAffiliates, RejectAffiliateParams,
        },
        audit::{AuditAction, AuditEntry},
        email::SendTemplateEmailParams,
        invite_code::InviteCode,
        person::Person,
    },
    service::{
        audit::AuditService,
        email::{template::TemplateMailer, webhook::WebhookNotifier},
        invite_code::InviteCodeService,
        notification::NotificationService,
    },
};

/// Template code the automated worker sends approval emails with.
pub const APPROVAL_TEMPLATE_CODE: &str = "affiliate_approved";

/// Service providing business logic for affiliate management.
pub struct AffiliateService<'a> {
    db: &'a DatabaseConnection,
    http: reqwest::Client,
    config: &'a Config,
}

impl<'a> AffiliateService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: reqwest::Client, config: &'a Config) -> Self {
        Self { db, http, config }
    }

    /// Registers a new referral application in PENDING status.
    ///
    /// # Returns
    /// - `Ok(Affiliate)` - The created application
    /// - `Err(AppError::BadRequest)` - Unknown sponsor or empty email
    pub async fn register(&self, param: CreateAffiliateParam) -> Result<Affiliate, AppError> {
        if param.email.trim().is_empty() {
            return Err(AppError::BadRequest("Email is required".to_string()));
        }

        let person_repo = PersonRepository::new(self.db);
        if person_repo.find_by_id(param.sponsor_id).await?.is_none() {
            return Err(AppError::BadRequest("Sponsor not found".to_string()));
        }

        let repo = AffiliateRepository::new(self.db);
        let affiliate = repo.create(param).await?;

        tracing::info!(affiliate_id = %affiliate.id, "affiliate application registered");

        Ok(affiliate)
    }

    /// Gets an affiliate with the sponsor's display name.
    pub async fn get(&self, id: Uuid) -> Result<Option<(Affiliate, Option<String>)>, AppError> {
        let repo = AffiliateRepository::new(self.db);

        let Some(affiliate) = repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let person_repo = PersonRepository::new(self.db);
        let sponsor_name = person_repo
            .find_by_id(affiliate.sponsor_id)
            .await?
            .map(|p| p.name);

        Ok(Some((affiliate, sponsor_name)))
    }

    /// Gets one page of affiliates with sponsor names resolved in a single
    /// batched lookup.
    pub async fn list(&self, param: ListAffiliatesParam) -> Result<PaginatedAffiliates, AppError> {
        let repo = AffiliateRepository::new(self.db);
        let (affiliates, total) = repo
            .get_all_paginated(param.status, param.page, param.per_page)
            .await?;

        let sponsor_ids: Vec<Uuid> = affiliates.iter().map(|a| a.sponsor_id).collect();
        let person_repo = PersonRepository::new(self.db);
        let names: HashMap<Uuid, String> = person_repo
            .names_by_ids(&sponsor_ids)
            .await?
            .into_iter()
            .collect();

        let total_pages = (total as f64 / param.per_page as f64).ceil() as u64;

        Ok(PaginatedAffiliates {
            affiliates: affiliates
                .into_iter()
                .map(|a| {
                    let name = names.get(&a.sponsor_id).cloned();
                    (a, name)
                })
                .collect(),
            total,
            page: param.page,
            per_page: param.per_page,
            total_pages,
        })
    }

    /// Approves a pending affiliate.
    ///
    /// Phase 1 validates the affiliate and sponsor. Phase 2 assigns an invite
    /// code and flips the affiliate to SENT, both through conditional updates;
    /// a failure here releases the code and aborts. Phase 3 (counter bump,
    /// audit, email, sponsor notification) is best-effort and reports problems
    /// through `ApprovalOutcome::warnings`.
    ///
    /// # Returns
    /// - `Ok(ApprovalOutcome)` - Approval committed
    /// - `Err(AppError::ApprovalErr(_))` - Validation or concurrency failure;
    ///   nothing was committed
    pub async fn approve(
        &self,
        params: ApproveAffiliateParams,
    ) -> Result<ApprovalOutcome, AppError> {
        tracing::info!(affiliate_id = %params.affiliate_id, "approval started");

        // Phase 1: validations.
        let repo = AffiliateRepository::new(self.db);
        let affiliate = repo
            .find_by_id(params.affiliate_id)
            .await?
            .ok_or(ApprovalError::AffiliateNotFound)?;

        if affiliate.status != AffiliateStatus::Pending {
            return Err(ApprovalError::NotPending(affiliate.status.to_string()).into());
        }

        let person_repo = PersonRepository::new(self.db);
        let sponsor = person_repo
            .find_by_id(affiliate.sponsor_id)
            .await?
            .ok_or(ApprovalError::SponsorNotFound)?;

        if !sponsor.active {
            return Err(ApprovalError::SponsorInactive.into());
        }
        if sponsor.invites_available() <= 0 {
            return Err(ApprovalError::NoInvitesAvailable.into());
        }

        // Phase 2: code assignment and status flip, with rollback.
        let code_service = InviteCodeService::new(self.db);
        let code = code_service.assign(&affiliate.email).await?;

        let now = Utc::now();
        if !repo.mark_sent(affiliate.id, now).await? {
            code_service.release(code.id).await;
            return Err(ApprovalError::AffiliateConflict.into());
        }

        // Phase 3: best-effort side effects.
        let mut warnings = Vec::new();

        match person_repo.increment_invites_used(sponsor.id).await {
            Ok(true) => {}
            Ok(false) | Err(_) => {
                tracing::warn!(sponsor_id = %sponsor.id, "failed to increment sponsor invite counter");
                warnings.push("Failed to increment the sponsor's used-invite counter".to_string());
            }
        }

        AuditService::new(self.db)
            .log(AuditEntry {
                action: AuditAction::ApproveAffiliate,
                account_id: params.account_id,
                entity_type: "affiliate".to_string(),
                entity_id: affiliate.id.to_string(),
                details: serde_json::json!({
                    "code_id": code.id,
                    "code": code.code,
                    "sponsor_id": sponsor.id,
                }),
                ip_address: params.ip_address.clone(),
                user_agent: params.user_agent.clone(),
            })
            .await;

        let email_sent = self
            .send_approval_email(&affiliate, &sponsor, &code, params.delivery)
            .await;
        if !email_sent {
            warnings.push("Approval email could not be delivered".to_string());
        }

        let affiliate_name = affiliate.name.clone().unwrap_or_else(|| affiliate.email.clone());
        if let Err(err) = NotificationService::new(self.db)
            .notify_sponsor_approved(sponsor.id, &affiliate_name)
            .await
        {
            tracing::warn!(sponsor_id = %sponsor.id, error = %err, "failed to notify sponsor");
            warnings.push("Failed to create the sponsor notification".to_string());
        }

        tracing::info!(affiliate_id = %affiliate.id, email_sent, "approval finished");

        Ok(ApprovalOutcome {
            affiliate: Affiliate {
                status: AffiliateStatus::Sent,
                email_sent: true,
                email_sent_at: Some(now),
                approved_at: Some(now),
                ..affiliate
            },
            code,
            email_sent,
            warnings,
        })
    }

    /// Rejects a pending affiliate.
    ///
    /// The reason is recorded only in the audit trail, not on the affiliate
    /// row. A rejection email is attempted once, best-effort.
    ///
    /// # Returns
    /// - `Ok(Affiliate)` - Affiliate now REJECTED
    /// - `Err(AppError::ApprovalErr(_))` - Missing affiliate, wrong status, or
    ///   a concurrent transition won
    pub async fn reject(&self, params: RejectAffiliateParams) -> Result<Affiliate, AppError> {
        let repo = AffiliateRepository::new(self.db);
        let affiliate = repo
            .find_by_id(params.affiliate_id)
            .await?
            .ok_or(ApprovalError::AffiliateNotFound)?;

        if affiliate.status != AffiliateStatus::Pending {
            return Err(ApprovalError::NotPending(affiliate.status.to_string()).into());
        }

        if !repo
            .transition_from_pending(affiliate.id, AffiliateStatus::Rejected)
            .await?
        {
            return Err(ApprovalError::AffiliateConflict.into());
        }

        AuditService::new(self.db)
            .log(AuditEntry {
                action: AuditAction::RejectAffiliate,
                account_id: params.account_id,
                entity_type: "affiliate".to_string(),
                entity_id: affiliate.id.to_string(),
                details: serde_json::json!({ "reason": params.reason }),
                ip_address: params.ip_address,
                user_agent: params.user_agent,
            })
            .await;

        let notifier = WebhookNotifier::new(self.db, self.http.clone(), self.config);
        if let Err(err) = notifier.send_rejection(&affiliate, &params.reason).await {
            tracing::warn!(affiliate_id = %affiliate.id, error = %err, "rejection email not sent");
        }

        tracing::info!(affiliate_id = %affiliate.id, "affiliate rejected");

        Ok(Affiliate {
            status: AffiliateStatus::Rejected,
            ..affiliate
        })
    }

    /// Sends the approval email through the configured delivery path.
    ///
    /// Returns whether delivery succeeded; failures are logged here and
    /// surfaced as a warning by the caller.
    async fn send_approval_email(
        &self,
        affiliate: &Affiliate,
        sponsor: &Person,
        code: &InviteCode,
        delivery: ApprovalDelivery,
    ) -> bool {
        let result = match delivery {
            ApprovalDelivery::Webhook => {
                let notifier = WebhookNotifier::new(self.db, self.http.clone(), self.config);
                notifier.send_approval(affiliate, sponsor, code).await
            }
            ApprovalDelivery::TemplateMail => {
                let affiliate_name = affiliate
                    .name
                    .clone()
                    .unwrap_or_else(|| affiliate.email.clone());
                let variables = HashMap::from([
                    ("name".to_string(), affiliate_name.clone()),
                    ("code".to_string(), code.code.clone()),
                    (
                        "invite_link".to_string(),
                        self.config.community_invite_link.clone(),
                    ),
                    ("sponsor_name".to_string(), sponsor.name.clone()),
                ]);

                TemplateMailer::new(self.db)
                    .send(SendTemplateEmailParams {
                        template_code: APPROVAL_TEMPLATE_CODE.to_string(),
                        recipient_email: affiliate.email.clone(),
                        recipient_name: Some(affiliate_name),
                        variables,
                        affiliate_id: Some(affiliate.id),
                    })
                    .await
            }
        };

        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(affiliate_id = %affiliate.id, error = %err, "approval email failed");
                false
            }
        }
    }
}
