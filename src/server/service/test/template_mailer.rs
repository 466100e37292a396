use sea_orm::DbErr;
use std::collections::HashMap;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{email::EmailError, AppError},
    model::email::SendTemplateEmailParams,
    service::email::template::TemplateMailer,
};

fn send_params(template_code: &str) -> SendTemplateEmailParams {
    SendTemplateEmailParams {
        template_code: template_code.to_string(),
        recipient_email: "recipient@example.com".to_string(),
        recipient_name: Some("Recipient".to_string()),
        variables: HashMap::from([
            ("name".to_string(), "Recipient".to_string()),
            ("code".to_string(), "ABCD1234".to_string()),
        ]),
        affiliate_id: None,
    }
}

/// Tests the unknown-template error.
#[tokio::test]
async fn fails_for_missing_template() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .with_email_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mailer = TemplateMailer::new(db);
    let err = mailer.send(send_params("does_not_exist")).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::EmailErr(EmailError::TemplateNotFound(_))
    ));

    Ok(())
}

/// Tests that missing SMTP settings abort before anything is logged or sent.
#[tokio::test]
async fn fails_without_smtp_settings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .with_email_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_template(db, "affiliate_approved").await?;

    let mailer = TemplateMailer::new(db);
    let err = mailer
        .send(send_params("affiliate_approved"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::EmailErr(EmailError::SmtpConfigIncomplete)
    ));

    Ok(())
}

/// Tests that partial SMTP settings (host but no credentials) still count as
/// incomplete.
#[tokio::test]
async fn partial_settings_are_incomplete() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .with_email_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_template(db, "affiliate_approved").await?;
    factory::set_setting(db, "smtp_host", "mail.test", "smtp").await?;

    let mailer = TemplateMailer::new(db);
    let err = mailer
        .send(send_params("affiliate_approved"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::EmailErr(EmailError::SmtpConfigIncomplete)
    ));

    Ok(())
}
