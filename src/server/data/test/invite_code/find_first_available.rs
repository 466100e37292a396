use super::*;

/// Tests that the oldest unused code is selected.
#[tokio::test]
async fn picks_oldest_unused_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let oldest = factory::create_code(db).await?;
    factory::create_code(db).await?;
    factory::create_used_code(db, "taken@example.com").await?;

    let repo = InviteCodeRepository::new(db);
    let picked = repo.find_first_available().await?.unwrap();

    assert_eq!(picked.id, oldest.id);

    Ok(())
}

/// Tests the empty-pool case.
///
/// Expected: Ok(None) when every code is used
#[tokio::test]
async fn returns_none_when_pool_empty() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_used_code(db, "taken@example.com").await?;

    let repo = InviteCodeRepository::new(db);
    assert!(repo.find_first_available().await?.is_none());
    assert_eq!(repo.count_available().await?, 0);

    Ok(())
}
