use super::*;

/// Tests marking a pending affiliate as sent.
///
/// Verifies the guarded update transitions the row and stamps the approval
/// and email timestamps.
///
/// Expected: Ok(true) with the row in SENT status
#[tokio::test]
async fn marks_pending_affiliate_sent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 0).await?;
    let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;

    let repo = AffiliateRepository::new(db);
    let updated = repo.mark_sent(affiliate.id, Utc::now()).await?;
    assert!(updated);

    let stored = repo.find_by_id(affiliate.id).await?.unwrap();
    assert_eq!(stored.status, AffiliateStatus::Sent);
    assert!(stored.email_sent);
    assert!(stored.email_sent_at.is_some());
    assert!(stored.approved_at.is_some());

    Ok(())
}

/// Tests that the guard refuses a non-pending affiliate.
///
/// A rejected application must not be flipped to SENT by a late approval.
///
/// Expected: Ok(false) with the row unchanged
#[tokio::test]
async fn refuses_non_pending_affiliate() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 0).await?;
    let affiliate = test_utils::factory::affiliate::AffiliateFactory::new(db, sponsor.id)
        .status("REJECTED")
        .build()
        .await?;

    let repo = AffiliateRepository::new(db);
    let updated = repo.mark_sent(affiliate.id, Utc::now()).await?;
    assert!(!updated);

    let stored = repo.find_by_id(affiliate.id).await?.unwrap();
    assert_eq!(stored.status, AffiliateStatus::Rejected);
    assert!(!stored.email_sent);

    Ok(())
}

/// Tests that a second mark_sent is a no-op.
///
/// The first call consumes the PENDING guard; replays must not re-stamp.
///
/// Expected: second call returns Ok(false)
#[tokio::test]
async fn second_mark_sent_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 0).await?;
    let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;

    let repo = AffiliateRepository::new(db);
    assert!(repo.mark_sent(affiliate.id, Utc::now()).await?);
    assert!(!repo.mark_sent(affiliate.id, Utc::now()).await?);

    Ok(())
}
