use super::*;

/// Tests the atomic counter increment used by the approval workflow.
#[tokio::test]
async fn increments_counter_in_place() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 2).await?;

    let repo = PersonRepository::new(db);
    assert!(repo.increment_invites_used(sponsor.id).await?);
    assert!(repo.increment_invites_used(sponsor.id).await?);

    let stored = repo.find_by_id(sponsor.id).await?.unwrap();
    assert_eq!(stored.invites_used, 4);
    assert_eq!(stored.invites_sent, 5);

    Ok(())
}

/// Tests the missing-sponsor case.
#[tokio::test]
async fn returns_false_for_unknown_person() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PersonRepository::new(db);
    assert!(!repo.increment_invites_used(uuid::Uuid::new_v4()).await?);

    Ok(())
}
