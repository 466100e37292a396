use super::*;

/// Tests overwriting a sponsor's quota counters.
#[tokio::test]
async fn overwrites_quota_counters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 2).await?;

    let repo = PersonRepository::new(db);
    let updated = repo
        .update_quota(UpdateQuotaParam {
            person_id: sponsor.id,
            invites_sent: 20,
            invites_used: 7,
        })
        .await?;
    assert!(updated);

    let stored = repo.find_by_id(sponsor.id).await?.unwrap();
    assert_eq!(stored.invites_sent, 20);
    assert_eq!(stored.invites_used, 7);
    assert_eq!(stored.invites_available(), 13);

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
    let updated = repo
        .update_quota(UpdateQuotaParam {
            person_id: uuid::Uuid::new_v4(),
            invites_sent: 1,
            invites_used: 0,
        })
        .await?;

    assert!(!updated);

    Ok(())
}
