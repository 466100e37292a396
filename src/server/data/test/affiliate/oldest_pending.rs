use super::*;

/// Tests that the worker queue returns pending applications oldest first.
#[tokio::test]
async fn returns_oldest_pending_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 10, 0).await?;
    let first = factory::create_pending_affiliate(db, sponsor.id).await?;
    let second = factory::create_pending_affiliate(db, sponsor.id).await?;
    test_utils::factory::affiliate::AffiliateFactory::new(db, sponsor.id)
        .status("SENT")
        .build()
        .await?;

    let repo = AffiliateRepository::new(db);
    let pending = repo.oldest_pending(10).await?;

    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].id, first.id);
    assert_eq!(pending[1].id, second.id);

    Ok(())
}

/// Tests that the batch limit caps the queue.
#[tokio::test]
async fn respects_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 10, 0).await?;
    for _ in 0..4 {
        factory::create_pending_affiliate(db, sponsor.id).await?;
    }

    let repo = AffiliateRepository::new(db);
    let pending = repo.oldest_pending(2).await?;

    assert_eq!(pending.len(), 2);

    Ok(())
}
