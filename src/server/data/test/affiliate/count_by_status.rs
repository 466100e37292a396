use super::*;

/// Tests the status aggregation query.
///
/// Expected: one (status, count) pair per distinct status
#[tokio::test]
async fn groups_counts_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 10, 0).await?;
    for _ in 0..2 {
        factory::create_pending_affiliate(db, sponsor.id).await?;
    }
    test_utils::factory::affiliate::AffiliateFactory::new(db, sponsor.id)
        .status("SENT")
        .build()
        .await?;

    let repo = AffiliateRepository::new(db);
    let counts = repo.count_by_status().await?;

    let pending = counts.iter().find(|(s, _)| s == "PENDING").unwrap();
    assert_eq!(pending.1, 2);
    let sent = counts.iter().find(|(s, _)| s == "SENT").unwrap();
    assert_eq!(sent.1, 1);

    Ok(())
}
