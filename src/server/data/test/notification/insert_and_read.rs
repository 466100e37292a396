use super::*;

/// Tests the unread inbox lifecycle: insert, list, mark read.
#[tokio::test]
async fn unread_lifecycle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = NotificationRepository::new(db);
    let notification = repo
        .insert(CreateNotificationParam {
            person_id: None,
            kind: NotificationKind::CodesLow,
            title: "Invite codes running low".to_string(),
            message: "Only 3 unused invite codes remain".to_string(),
            data: Some(serde_json::json!({ "available": 3 })),
        })
        .await?;

    assert!(!notification.read);
    assert_eq!(repo.unread_count().await?, 1);
    assert_eq!(repo.list_unread(10).await?.len(), 1);

    assert!(repo.mark_read(notification.id).await?);
    assert_eq!(repo.unread_count().await?, 0);
    assert!(repo.list_unread(10).await?.is_empty());

    Ok(())
}

/// Tests marking an unknown notification.
#[tokio::test]
async fn mark_read_returns_false_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_referral_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = NotificationRepository::new(db);
    assert!(!repo.mark_read(uuid::Uuid::new_v4()).await?);

    Ok(())
}
