use super::*;

/// Tests the batched lookup: present keys returned, absent keys skipped.
#[tokio::test]
async fn returns_present_keys_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_email_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::set_setting(db, "smtp_host", "mail.test", "smtp").await?;
    factory::set_setting(db, "smtp_user", "mailer", "smtp").await?;

    let repo = EmailSettingRepository::new(db);
    let values = repo
        .get_values(&["smtp_host", "smtp_user", "smtp_password"])
        .await?;

    assert_eq!(values.len(), 2);
    assert_eq!(values.get("smtp_host").map(String::as_str), Some("mail.test"));
    assert!(!values.contains_key("smtp_password"));

    Ok(())
}
