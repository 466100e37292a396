use super::*;

/// Tests that only people with nonzero quota counters are sponsors.
#[tokio::test]
async fn returns_only_people_with_quota() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_person(db).await?; // plain member, no quota
    let with_sent = factory::create_sponsor(db, 3, 0).await?;
    let with_used_only = test_utils::factory::person::PersonFactory::new(db)
        .invites_used(2)
        .build()
        .await?;

    let repo = PersonRepository::new(db);
    let sponsors = repo.list_sponsors(10).await?;

    let ids: Vec<_> = sponsors.iter().map(|s| s.id).collect();
    assert_eq!(sponsors.len(), 2);
    assert!(ids.contains(&with_sent.id));
    assert!(ids.contains(&with_used_only.id));

    assert_eq!(repo.count_sponsors().await?, 2);

    Ok(())
}
