use super::*;

/// Tests account deletion.
#[tokio::test]
async fn deletes_existing_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::create_account(db).await?;

    let repo = AccountRepository::new(db);
    assert!(repo.delete(account.id).await?);
    assert!(repo.find_by_id(account.id).await?.is_none());

    Ok(())
}

/// Tests the missing-account case.
#[tokio::test]
async fn returns_false_for_unknown_account() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AccountRepository::new(db);
    assert!(!repo.delete(uuid::Uuid::new_v4()).await?);

    Ok(())
}
