use super::*;

/// Tests rejecting a pending affiliate through the guarded transition.
///
/// Expected: Ok(true) with the row in REJECTED status
#[tokio::test]
async fn transitions_pending_to_rejected() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 0).await?;
    let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;

    let repo = AffiliateRepository::new(db);
    assert!(
        repo.transition_from_pending(affiliate.id, AffiliateStatus::Rejected)
            .await?
    );

    let stored = repo.find_by_id(affiliate.id).await?.unwrap();
    assert_eq!(stored.status, AffiliateStatus::Rejected);

    Ok(())
}

/// Tests that competing transitions cannot both win.
///
/// Whichever transition runs second must see zero affected rows.
///
/// Expected: first Ok(true), second Ok(false)
#[tokio::test]
async fn only_one_transition_wins() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 0).await?;
    let affiliate = factory::create_pending_affiliate(db, sponsor.id).await?;

    let repo = AffiliateRepository::new(db);
    assert!(
        repo.transition_from_pending(affiliate.id, AffiliateStatus::Rejected)
            .await?
    );
    assert!(
        !repo
            .transition_from_pending(affiliate.id, AffiliateStatus::AlreadyMember)
            .await?
    );

    let stored = repo.find_by_id(affiliate.id).await?.unwrap();
    assert_eq!(stored.status, AffiliateStatus::Rejected);

    Ok(())
}
