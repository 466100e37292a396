use super::*;

/// Tests creating a new affiliate application.
///
/// Verifies that the repository creates a pending application with the
/// submitted contact data and no delivery bookkeeping yet.
///
/// Expected: Ok with a PENDING affiliate
#[tokio::test]
async fn creates_pending_application() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 0).await?;

    let repo = AffiliateRepository::new(db);
    let affiliate = repo
        .create(CreateAffiliateParam {
            name: Some("New Applicant".to_string()),
            email: "applicant@example.com".to_string(),
            sponsor_id: sponsor.id,
        })
        .await?;

    assert_eq!(affiliate.status, AffiliateStatus::Pending);
    assert_eq!(affiliate.email, "applicant@example.com");
    assert_eq!(affiliate.sponsor_id, sponsor.id);
    assert!(!affiliate.email_sent);
    assert!(affiliate.approved_at.is_none());

    Ok(())
}

/// Tests that created applications are readable back by id.
#[tokio::test]
async fn created_application_is_findable() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sponsor = factory::create_sponsor(db, 5, 0).await?;

    let repo = AffiliateRepository::new(db);
    let created = repo
        .create(CreateAffiliateParam {
            name: None,
            email: "nameless@example.com".to_string(),
            sponsor_id: sponsor.id,
        })
        .await?;

    let found = repo.find_by_id(created.id).await?;

    assert_eq!(found, Some(created));

    Ok(())
}
