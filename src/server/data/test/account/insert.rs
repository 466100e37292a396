use super::*;

/// Tests account insertion with role grants.
#[tokio::test]
async fn inserts_account_with_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AccountRepository::new(db);
    let account = repo
        .insert(
            "ops@example.com".to_string(),
            "Ops".to_string(),
            "fake-hash".to_string(),
            &[Role::Admin, Role::Editor],
        )
        .await?;

    assert_eq!(account.email, "ops@example.com");
    assert!(account.is_admin());
    assert!(account.can_edit());

    let found = repo.find_by_id(account.id).await?.unwrap();
    assert_eq!(found.roles.len(), 2);

    Ok(())
}

/// Tests the credential lookup returning the stored hash.
#[tokio::test]
async fn finds_account_with_hash_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::account::AccountFactory::new(db)
        .email("login@example.com")
        .password_hash("stored-hash")
        .build()
        .await?;

    let repo = AccountRepository::new(db);
    let (account, hash) = repo
        .find_by_email_with_hash("login@example.com")
        .await?
        .unwrap();

    assert_eq!(account.email, "login@example.com");
    assert_eq!(hash, "stored-hash");

    assert!(repo
        .find_by_email_with_hash("nobody@example.com")
        .await?
        .is_none());

    Ok(())
}

/// Tests the bootstrap existence check.
#[tokio::test]
async fn any_exists_reflects_table_state() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AccountRepository::new(db);
    assert!(!repo.any_exists().await?);

    factory::create_account(db).await?;
    assert!(repo.any_exists().await?);

    Ok(())
}
