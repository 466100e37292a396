use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

use super::test_config;
use crate::server::{
    data::{
        affiliate::AffiliateRepository, audit_log::AuditLogRepository,
        invite_code::InviteCodeRepository, notification::NotificationRepository,
        person::PersonRepository,
    },
    error::{approval::ApprovalError, AppError},
    model::affiliate::{
        AffiliateStatus, ApprovalDelivery, ApproveAffiliateParams, CreateAffiliateParam,
        RejectAffiliateParams,
    },
    service::affiliate::AffiliateService,
};

fn approve_params(affiliate_id: Uuid) -> ApproveAffiliateParams {
    ApproveAffiliateParams {
        affiliate_id,
        account_id: Some(Uuid::new_v4()),
        ip_address: Some("10.0.0.1".to_string()),
        user_agent: Some("tests".to_string()),
        delivery: ApprovalDelivery::Webhook,
    }
}

/// Tests the full approval path.
///
/// With no webhook configured the email step fails, which must surface as a
/// warning while the approval itself commits: affiliate SENT, code assigned
/// to the applicant, sponsor counter bumped, audit row and sponsor
/// notification written.
#[tokio::test]
async fn approval_commits_with_email_warning() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 1).await?;
    let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;
    let code = factory::create_code(db).await?;

    let config = test_config();
    let service = AffiliateService::new(db, reqwest::Client::new(), &config);
    let outcome = service.approve(approve_params(affiliate.id)).await.unwrap();

    assert_eq!(outcome.affiliate.status, AffiliateStatus::Sent);
    assert_eq!(outcome.code.id, code.id);
    assert!(!outcome.email_sent);
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.contains("email")));

    // Affiliate row committed.
    let stored = AffiliateRepository::new(db)
        .find_by_id(affiliate.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, AffiliateStatus::Sent);
    assert!(stored.email_sent);

    // Code assigned to the applicant's email.
    let stored_code = InviteCodeRepository::new(db)
        .find_by_id(code.id)
        .await?
        .unwrap();
    assert!(stored_code.used);
    assert_eq!(stored_code.email.as_deref(), Some(affiliate.email.as_str()));

    // Sponsor counter bumped.
    let stored_sponsor = PersonRepository::new(db)
        .find_by_id(sponsor.id)
        .await?
        .unwrap();
    assert_eq!(stored_sponsor.invites_used, 2);

    // Audit row written.
    let audits = AuditLogRepository::new(db)
        .get_by_entity("affiliate", &affiliate.id.to_string(), 10)
        .await?;
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, "APPROVE_AFFILIATE");

    // Sponsor notification created.
    let notifications = NotificationRepository::new(db).list_unread(10).await?;
    assert!(notifications
        .iter()
        .any(|n| n.person_id == Some(sponsor.id) && n.kind == "AFFILIATE_APPROVED"));

    Ok(())
}

/// Tests that a non-pending affiliate is refused before any mutation.
#[tokio::test]
async fn rejects_non_pending_affiliate() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 0).await?;
    let affiliate = test_utils::factory::affiliate::AffiliateFactory::new(db, sponsor.id)
        .status("SENT")
        .build()
        .await?;
    factory::create_code(db).await?;

    let config = test_config();
    let service = AffiliateService::new(db, reqwest::Client::new(), &config);
    let err = service.approve(approve_params(affiliate.id)).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::ApprovalErr(ApprovalError::NotPending(_))
    ));
    assert_eq!(InviteCodeRepository::new(db).count_available().await?, 1);

    Ok(())
}

/// Tests the inactive-sponsor validation.
#[tokio::test]
async fn rejects_inactive_sponsor() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = test_utils::factory::person::PersonFactory::new(db)
        .invites_sent(5)
        .active(false)
        .build()
        .await?;
    let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;
    factory::create_code(db).await?;

    let config = test_config();
    let service = AffiliateService::new(db, reqwest::Client::new(), &config);
    let err = service.approve(approve_params(affiliate.id)).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::ApprovalErr(ApprovalError::SponsorInactive)
    ));

    Ok(())
}

/// Tests the exhausted-quota validation.
#[tokio::test]
async fn rejects_sponsor_without_invites() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 3, 3).await?;
    let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;
    factory::create_code(db).await?;

    let config = test_config();
    let service = AffiliateService::new(db, reqwest::Client::new(), &config);
    let err = service.approve(approve_params(affiliate.id)).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::ApprovalErr(ApprovalError::NoInvitesAvailable)
    ));

    let stored = AffiliateRepository::new(db)
        .find_by_id(affiliate.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, AffiliateStatus::Pending);

    Ok(())
}

/// Tests the empty-pool abort.
///
/// The affiliate must stay pending and an admin notification about the pool
/// must be raised.
#[tokio::test]
async fn aborts_when_codes_exhausted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 0).await?;
    let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;

    let config = test_config();
    let service = AffiliateService::new(db, reqwest::Client::new(), &config);
    let err = service.approve(approve_params(affiliate.id)).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::ApprovalErr(ApprovalError::CodesExhausted)
    ));

    let stored = AffiliateRepository::new(db)
        .find_by_id(affiliate.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, AffiliateStatus::Pending);

    let notifications = NotificationRepository::new(db).list_unread(10).await?;
    assert!(notifications.iter().any(|n| n.kind == "CODES_LOW"));

    Ok(())
}

/// Tests rejection: status flip plus audit row carrying the reason.
#[tokio::test]
async fn rejection_records_reason_in_audit_trail() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 0).await?;
    let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;

    let config = test_config();
    let service = AffiliateService::new(db, reqwest::Client::new(), &config);
    let rejected = service
        .reject(RejectAffiliateParams {
            affiliate_id: affiliate.id,
            reason: "duplicate application".to_string(),
            account_id: Some(Uuid::new_v4()),
            ip_address: None,
            user_agent: None,
        })
        .await
        .unwrap();

    assert_eq!(rejected.status, AffiliateStatus::Rejected);

    let stored = AffiliateRepository::new(db)
        .find_by_id(affiliate.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, AffiliateStatus::Rejected);

    let audits = AuditLogRepository::new(db)
        .get_by_entity("affiliate", &affiliate.id.to_string(), 10)
        .await?;
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, "REJECT_AFFILIATE");
    assert_eq!(audits[0].details["reason"], "duplicate application");

    Ok(())
}

/// Tests that registration validates the sponsor.
#[tokio::test]
async fn registration_requires_existing_sponsor() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let config = test_config();
    let service = AffiliateService::new(db, reqwest::Client::new(), &config);
    let err = service
        .register(CreateAffiliateParam {
            name: None,
            email: "orphan@example.com".to_string(),
            sponsor_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}
