use super::*;

/// Tests insert-then-overwrite semantics of the upsert.
#[tokio::test]
async fn overwrites_existing_value() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_email_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EmailSettingRepository::new(db);

    let created = repo.upsert("smtp_host", "mail.one.test", "smtp").await?;
    assert_eq!(created.value, "mail.one.test");

    let overwritten = repo.upsert("smtp_host", "mail.two.test", "smtp").await?;
    assert_eq!(overwritten.value, "mail.two.test");

    assert_eq!(
        repo.get("smtp_host").await?.as_deref(),
        Some("mail.two.test")
    );

    Ok(())
}
