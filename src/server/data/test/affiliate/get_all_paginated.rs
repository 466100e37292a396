use super::*;

/// Tests pagination and the status filter together.
///
/// Expected: only matching rows, correct total
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 10, 0).await?;
    for _ in 0..3 {
        factory::create_pending_affiliate(db, sponsor.id).await?;
    }
    test_utils::factory::affiliate::AffiliateFactory::new(db, sponsor.id)
        .status("SENT")
        .build()
        .await?;

    let repo = AffiliateRepository::new(db);

    let (pending, pending_total) = repo
        .get_all_paginated(Some(AffiliateStatus::Pending), 0, 10)
        .await?;
    assert_eq!(pending_total, 3);
    assert!(pending.iter().all(|a| a.status == AffiliateStatus::Pending));

    let (all, all_total) = repo.get_all_paginated(None, 0, 10).await?;
    assert_eq!(all_total, 4);
    assert_eq!(all.len(), 4);

    Ok(())
}

/// Tests that page size limits the returned rows while total stays global.
#[tokio::test]
async fn paginates_results() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 10, 0).await?;
    for _ in 0..5 {
        factory::create_pending_affiliate(db, sponsor.id).await?;
    }

    let repo = AffiliateRepository::new(db);
    let (page, total) = repo.get_all_paginated(None, 0, 2).await?;

    assert_eq!(page.len(), 2);
    assert_eq!(total, 5);

    Ok(())
}
