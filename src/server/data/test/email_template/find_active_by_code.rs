use super::*;

/// Tests that the mailer lookup sees active templates only.
#[tokio::test]
async fn ignores_inactive_templates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_email_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let template = factory::create_template(db, "affiliate_approved").await?;

    let repo = EmailTemplateRepository::new(db);
    assert!(repo.find_active_by_code("affiliate_approved").await?.is_some());

    repo.update(
        template.id,
        UpdateEmailTemplateParam {
            active: Some(false),
            ..Default::default()
        },
    )
    .await?;

    assert!(repo.find_active_by_code("affiliate_approved").await?.is_none());

    Ok(())
}
