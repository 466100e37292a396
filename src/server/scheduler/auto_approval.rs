//! Automated processing of pending affiliate applications.
//!
//! Runs every minute, gated by the `worker_enabled` setting so operators can
//! pause it from the admin panel without a deploy. Each tick takes the oldest
//! pending applications (up to `worker_batch_size`) and runs them through the
//! same approval workflow a manual approval uses, with the template mailer as
//! the delivery path and no acting account in the audit trail.
//!
//! Applications whose sponsor is missing, inactive or out of invites are
//! skipped and stay pending - an operator decides what to do with those.

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    config::Config,
    data::{
        affiliate::AffiliateRepository, email_setting::EmailSettingRepository,
        person::PersonRepository,
    },
    error::AppError,
    model::affiliate::{
        Affiliate, AffiliateStatus, ApprovalDelivery, ApproveAffiliateParams,
    },
    service::affiliate::AffiliateService,
};

/// Pending applications processed per tick when `worker_batch_size` is unset.
const DEFAULT_BATCH_SIZE: u64 = 5;

/// Starts the auto-approval scheduler.
///
/// # Arguments
/// - `db` - Database connection
/// - `http` - HTTP client for webhook notifications (rejection path)
/// - `config` - Application configuration for email links
pub async fn start_scheduler(
    db: DatabaseConnection,
    http: reqwest::Client,
    config: Arc<Config>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job_http = http.clone();
    let job_config = config.clone();

    // Run every minute.
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = job_db.clone();
        let http = job_http.clone();
        let config = job_config.clone();

        Box::pin(async move {
            if let Err(e) = process_pending_affiliates(&db, http, &config).await {
                tracing::error!("Error processing pending affiliates: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Auto-approval scheduler started");

    Ok(())
}

/// Processes one batch of pending affiliates, if the worker is enabled.
async fn process_pending_affiliates(
    db: &DatabaseConnection,
    http: reqwest::Client,
    config: &Config,
) -> Result<(), AppError> {
    let settings = EmailSettingRepository::new(db);

    let enabled = settings
        .get("worker_enabled")
        .await?
        .map(|v| v == "true")
        .unwrap_or(false);
    if !enabled {
        return Ok(());
    }

    let batch_size = settings
        .get("worker_batch_size")
        .await?
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_BATCH_SIZE);

    let pending = AffiliateRepository::new(db).oldest_pending(batch_size).await?;
    if pending.is_empty() {
        return Ok(());
    }

    tracing::info!(count = pending.len(), "processing pending affiliates");

    for affiliate in pending {
        if let Err(e) = process_one(db, &http, config, &affiliate).await {
            tracing::error!(
                affiliate_id = %affiliate.id,
                "Error processing affiliate: {}",
                e
            );
        }
    }

    Ok(())
}

/// Processes a single pending affiliate.
async fn process_one(
    db: &DatabaseConnection,
    http: &reqwest::Client,
    config: &Config,
    affiliate: &Affiliate,
) -> Result<(), AppError> {
    // Applicants already in the member table don't need an invite.
    if let Some(person) = PersonRepository::new(db)
        .find_by_email(&affiliate.email)
        .await?
    {
        let repo = AffiliateRepository::new(db);
        if repo
            .transition_from_pending(affiliate.id, AffiliateStatus::AlreadyMember)
            .await?
        {
            repo.set_person(affiliate.id, person.id).await?;
            tracing::info!(
                affiliate_id = %affiliate.id,
                person_id = %person.id,
                "applicant is already a member"
            );
        }
        return Ok(());
    }

    let service = AffiliateService::new(db, http.clone(), config);
    let result = service
        .approve(ApproveAffiliateParams {
            affiliate_id: affiliate.id,
            account_id: None,
            ip_address: None,
            user_agent: None,
            delivery: ApprovalDelivery::TemplateMail,
        })
        .await;

    match result {
        Ok(outcome) => {
            tracing::info!(
                affiliate_id = %affiliate.id,
                email_sent = outcome.email_sent,
                "affiliate auto-approved"
            );
        }
        Err(AppError::ApprovalErr(err)) => {
            // Sponsor problems and pool exhaustion leave the application
            // pending for an operator to look at.
            tracing::warn!(
                affiliate_id = %affiliate.id,
                reason = %err,
                "affiliate skipped by worker"
            );
        }
        Err(err) => return Err(err),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::data::invite_code::InviteCodeRepository;
    use sea_orm::DbErr;
    use test_utils::{builder::TestBuilder, factory};

    fn worker_config() -> Config {
        Config {
            database_url: String::new(),
            bind_addr: String::new(),
            app_url: "http://localhost:8080".to_string(),
            approval_webhook_url: None,
            rejection_webhook_url: None,
            community_invite_link: "https://t.me/test-community".to_string(),
            admin_email: None,
            admin_password: None,
        }
    }

    /// With the worker disabled (no setting row), a tick must not touch any
    /// application.
    #[tokio::test]
    async fn disabled_worker_leaves_applications_alone() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_referral_tables()
            .with_email_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let sponsor = factory::create_sponsor(db, 5, 0).await?;
        let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;
        factory::create_code(db).await?;

        let config = worker_config();
        process_pending_affiliates(db, reqwest::Client::new(), &config)
            .await
            .unwrap();

        let stored = AffiliateRepository::new(db)
            .find_by_id(affiliate.id)
            .await?
            .unwrap();
        assert_eq!(stored.status, AffiliateStatus::Pending);

        Ok(())
    }

    /// Applicants whose email already belongs to a member are flagged, not
    /// approved - no code is consumed.
    #[tokio::test]
    async fn flags_existing_members() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_referral_tables()
            .with_email_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        factory::set_setting(db, "worker_enabled", "true", "worker").await?;

        let member = test_utils::factory::person::PersonFactory::new(db)
            .email("member@example.com")
            .build()
            .await?;
        let sponsor = factory::create_sponsor(db, 5, 0).await?;
        let affiliate = test_utils::factory::affiliate::AffiliateFactory::new(db, sponsor.id)
            .email("member@example.com")
            .build()
            .await?;
        factory::create_code(db).await?;

        let config = worker_config();
        process_pending_affiliates(db, reqwest::Client::new(), &config)
            .await
            .unwrap();

        let stored = AffiliateRepository::new(db)
            .find_by_id(affiliate.id)
            .await?
            .unwrap();
        assert_eq!(stored.status, AffiliateStatus::AlreadyMember);
        assert_eq!(stored.person_id, Some(member.id));
        assert_eq!(InviteCodeRepository::new(db).count_available().await?, 1);

        Ok(())
    }

    /// An enabled worker approves a valid pending application end to end.
    /// The template mail fails (no SMTP settings) but the approval stands.
    #[tokio::test]
    async fn approves_valid_pending_application() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_referral_tables()
            .with_email_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        factory::set_setting(db, "worker_enabled", "true", "worker").await?;
        factory::create_template(db, "affiliate_approved").await?;

        let sponsor = factory::create_sponsor(db, 5, 0).await?;
        let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;
        factory::create_code(db).await?;

        let config = worker_config();
        process_pending_affiliates(db, reqwest::Client::new(), &config)
            .await
            .unwrap();

        let stored = AffiliateRepository::new(db)
            .find_by_id(affiliate.id)
            .await?
            .unwrap();
        assert_eq!(stored.status, AffiliateStatus::Sent);
        assert_eq!(InviteCodeRepository::new(db).count_available().await?, 0);

        Ok(())
    }
}
