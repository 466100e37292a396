use super::*;

/// Tests the conditional assignment of an unused code.
///
/// Expected: Ok(true) with email, used flag and timestamp set
#[tokio::test]
async fn assigns_unused_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let code = factory::create_code(db).await?;

    let repo = InviteCodeRepository::new(db);
    let assigned = repo
        .assign(code.id, "applicant@example.com", Utc::now())
        .await?;
    assert!(assigned);

    let stored = repo.find_by_id(code.id).await?.unwrap();
    assert!(stored.used);
    assert_eq!(stored.email.as_deref(), Some("applicant@example.com"));
    assert!(stored.assigned_at.is_some());

    Ok(())
}

/// Tests that a used code cannot be assigned again.
///
/// The `used = false` guard in the UPDATE must make the second assignment a
/// no-op, leaving the first recipient in place.
///
/// Expected: second assign returns Ok(false)
#[tokio::test]
async fn refuses_double_assignment() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let code = factory::create_code(db).await?;

    let repo = InviteCodeRepository::new(db);
    assert!(repo.assign(code.id, "first@example.com", Utc::now()).await?);
    assert!(!repo.assign(code.id, "second@example.com", Utc::now()).await?);

    let stored = repo.find_by_id(code.id).await?.unwrap();
    assert_eq!(stored.email.as_deref(), Some("first@example.com"));

    Ok(())
}

/// Tests the email lookup of an assigned code.
#[tokio::test]
async fn finds_code_by_assigned_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let code = factory::create_used_code(db, "member@example.com").await?;

    let repo = InviteCodeRepository::new(db);
    let found = repo.find_by_email("member@example.com").await?.unwrap();
    assert_eq!(found.id, code.id);

    assert!(repo.find_by_email("nobody@example.com").await?.is_none());

    Ok(())
}
