use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

use crate::server::{
    data::{audit_log::AuditLogRepository, person::PersonRepository},
    service::anonymize::AnonymizeService,
};

/// Tests a full anonymization run.
///
/// Every person's name and email must change, the counters must add up, and
/// the run must leave an audit row.
#[tokio::test]
async fn replaces_identities_and_audits_run() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut originals = Vec::new();
    for _ in 0..3 {
        let person = factory::create_person(db).await?;
        originals.push((person.id, person.name, person.email));
    }

    let service = AnonymizeService::new(db);
    let stats = service
        .run(Some(Uuid::new_v4()), None, None)
        .await
        .unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.updated, 3);
    assert_eq!(stats.errors, 0);

    let repo = PersonRepository::new(db);
    for (id, old_name, old_email) in originals {
        let person = repo.find_by_id(id).await?.unwrap();
        assert_ne!(person.name, old_name);
        assert_ne!(person.email, old_email);
        assert!(person.email.contains('@'));
    }

    let audits = AuditLogRepository::new(db)
        .get_by_entity("person", "all", 10)
        .await?;
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, "ANONYMIZE_DATA");
    assert_eq!(audits[0].details["updated"], 3);

    Ok(())
}

/// Tests that an empty table yields zeroed counters.
#[tokio::test]
async fn empty_table_is_a_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stats = AnonymizeService::new(db)
        .run(None, None, None)
        .await
        .unwrap();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.updated, 0);

    Ok(())
}
