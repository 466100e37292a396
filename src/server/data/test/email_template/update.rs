use super::*;

/// Tests partial template updates and the updated_at bump.
#[tokio::test]
async fn updates_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_email_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let template = factory::create_template(db, "welcome").await?;

    let repo = EmailTemplateRepository::new(db);
    let updated = repo
        .update(
            template.id,
            UpdateEmailTemplateParam {
                subject: Some("New subject {{ name }}".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.subject, "New subject {{ name }}");
    assert_eq!(updated.body, template.body);
    assert!(updated.updated_at >= template.updated_at);

    Ok(())
}

/// Tests the missing-template case.
#[tokio::test]
async fn returns_none_for_unknown_template() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_email_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EmailTemplateRepository::new(db);
    let result = repo
        .update(uuid::Uuid::new_v4(), UpdateEmailTemplateParam::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
