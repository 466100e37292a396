use super::*;

/// Tests the rollback release of an assigned code.
///
/// Expected: code back in the pool with no recipient or timestamp
#[tokio::test]
async fn releases_assigned_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let code = factory::create_used_code(db, "rollback@example.com").await?;

    let repo = InviteCodeRepository::new(db);
    repo.release(code.id).await?;

    let stored = repo.find_by_id(code.id).await?.unwrap();
    assert!(!stored.used);
    assert!(stored.email.is_none());
    assert!(stored.assigned_at.is_none());
    assert_eq!(repo.count_available().await?, 1);

    Ok(())
}
