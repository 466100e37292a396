use super::*;

/// Tests batch insertion of generated codes.
#[tokio::test]
async fn inserts_generated_codes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteCodeRepository::new(db);
    let codes: Vec<String> = (0..5).map(|i| format!("BATCH{:03}", i)).collect();
    repo.insert_batch(&codes).await?;

    assert_eq!(repo.count_all().await?, 5);
    assert_eq!(repo.count_available().await?, 5);
    assert!(repo.code_exists("BATCH000").await?);
    assert!(!repo.code_exists("MISSING1").await?);

    Ok(())
}

/// Tests that an empty batch is a no-op.
#[tokio::test]
async fn empty_batch_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteCodeRepository::new(db);
    repo.insert_batch(&[]).await?;

    assert_eq!(repo.count_all().await?, 0);

    Ok(())
}
