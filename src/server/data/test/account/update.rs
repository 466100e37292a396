use super::*;

/// Tests that a role update replaces the whole grant set.
#[tokio::test]
async fn replaces_role_set() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::account::AccountFactory::new(db)
        .roles(&["ADMIN", "EDITOR"])
        .build()
        .await?;

    let repo = AccountRepository::new(db);
    let updated = repo
        .update(UpdateAccountParam {
            account_id: account.id,
            name: Some("Renamed".to_string()),
            roles: Some(vec![Role::Viewer]),
        })
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.roles, vec![Role::Viewer]);
    assert!(!updated.is_admin());

    Ok(())
}

/// Tests that omitting roles keeps the existing grants.
#[tokio::test]
async fn keeps_roles_when_not_provided() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let account = factory::create_admin_account(db).await?;

    let repo = AccountRepository::new(db);
    let updated = repo
        .update(UpdateAccountParam {
            account_id: account.id,
            name: Some("Still Admin".to_string()),
            roles: None,
        })
        .await?
        .unwrap();

    assert!(updated.is_admin());

    Ok(())
}
