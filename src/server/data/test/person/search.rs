use super::*;

/// Tests substring search over name and email.
#[tokio::test]
async fn matches_name_and_email_substrings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    test_utils::factory::person::PersonFactory::new(db)
        .name("Mariana Costa")
        .email("mariana@example.com")
        .build()
        .await?;
    test_utils::factory::person::PersonFactory::new(db)
        .name("Paulo Dias")
        .email("paulo@elsewhere.com")
        .build()
        .await?;

    let repo = PersonRepository::new(db);

    let by_name = repo.search(Some("Mariana"), 10).await?;
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Mariana Costa");

    let by_email = repo.search(Some("elsewhere"), 10).await?;
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].name, "Paulo Dias");

    Ok(())
}

/// Tests that an absent search term returns everyone up to the limit.
#[tokio::test]
async fn no_term_returns_all_up_to_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::create_person(db).await?;
    }

    let repo = PersonRepository::new(db);
    assert_eq!(repo.search(None, 10).await?.len(), 3);
    assert_eq!(repo.search(None, 2).await?.len(), 2);

    Ok(())
}
