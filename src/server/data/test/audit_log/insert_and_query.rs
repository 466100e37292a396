use super::*;
use entity::prelude::AuditLog;

fn entry(action: AuditAction, entity_id: &str) -> AuditEntry {
    AuditEntry {
        action,
        account_id: Some(Uuid::new_v4()),
        entity_type: "affiliate".to_string(),
        entity_id: entity_id.to_string(),
        details: serde_json::json!({ "reason": "test" }),
        ip_address: Some("10.0.0.1".to_string()),
        user_agent: Some("tests".to_string()),
    }
}

/// Tests inserting and reading back an audit row.
#[tokio::test]
async fn inserts_audit_row() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(AuditLog).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuditLogRepository::new(db);
    let log = repo.insert(entry(AuditAction::ApproveAffiliate, "a-1")).await?;

    assert_eq!(log.action, "APPROVE_AFFILIATE");
    assert_eq!(log.entity_id, "a-1");
    assert_eq!(log.details["reason"], "test");

    Ok(())
}

/// Tests the per-entity query, newest first with a limit.
#[tokio::test]
async fn queries_by_entity() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(AuditLog).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuditLogRepository::new(db);
    repo.insert(entry(AuditAction::ApproveAffiliate, "a-1")).await?;
    repo.insert(entry(AuditAction::RejectAffiliate, "a-1")).await?;
    repo.insert(entry(AuditAction::ApproveAffiliate, "a-2")).await?;

    let logs = repo.get_by_entity("affiliate", "a-1", 10).await?;
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|l| l.entity_id == "a-1"));

    let recent = repo.get_recent(2).await?;
    assert_eq!(recent.len(), 2);

    Ok(())
}
