use super::*;

/// Tests partial update semantics: provided fields change, absent fields
/// survive.
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let person = test_utils::factory::person::PersonFactory::new(db)
        .name("Original Name")
        .state("SP")
        .build()
        .await?;

    let repo = PersonRepository::new(db);
    let updated = repo
        .update(
            person.id,
            UpdatePersonParam {
                city: Some("Campinas".to_string()),
                active: Some(false),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Original Name");
    assert_eq!(updated.state.as_deref(), Some("SP"));
    assert_eq!(updated.city.as_deref(), Some("Campinas"));
    assert!(!updated.active);

    Ok(())
}

/// Tests the missing-person case.
#[tokio::test]
async fn returns_none_for_unknown_person() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PersonRepository::new(db);
    let result = repo
        .update(uuid::Uuid::new_v4(), UpdatePersonParam::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
