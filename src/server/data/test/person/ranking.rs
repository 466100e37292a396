use super::*;

/// Tests the ranking order and the zero-usage exclusion.
#[tokio::test]
async fn orders_by_used_invites_descending() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let top = factory::create_sponsor(db, 20, 15).await?;
    let middle = factory::create_sponsor(db, 10, 5).await?;
    factory::create_sponsor(db, 10, 0).await?; // never used an invite

    let repo = PersonRepository::new(db);
    let ranking = repo.ranking(10).await?;

    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].id, top.id);
    assert_eq!(ranking[1].id, middle.id);

    Ok(())
}
