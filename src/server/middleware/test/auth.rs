use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::AuthSession,
    },
};

/// Tests that a request without a session is rejected.
#[tokio::test]
async fn rejects_request_without_session() {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let guard = AuthGuard::new(db, session);
    let err = guard.require(&[]).await.unwrap_err();

    assert!(matches!(err, AppError::AuthErr(AuthError::NotLoggedIn)));
}

/// Tests that a session pointing at a deleted account is rejected.
#[tokio::test]
async fn rejects_stale_session() {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session)
        .set_account_id(Uuid::new_v4())
        .await
        .unwrap();

    let guard = AuthGuard::new(db, session);
    let err = guard.require(&[]).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::AuthErr(AuthError::AccountNotInDatabase(_))
    ));
}

/// Tests that any logged-in account passes an empty permission check.
#[tokio::test]
async fn viewer_passes_empty_permission_check() {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let viewer = factory::create_account(db).await.unwrap();
    AuthSession::new(session)
        .set_account_id(viewer.id)
        .await
        .unwrap();

    let guard = AuthGuard::new(db, session);
    let account = guard.require(&[]).await.unwrap();

    assert_eq!(account.id, viewer.id);
    assert!(!account.can_edit());
}

/// Tests that a viewer cannot pass the Edit check.
#[tokio::test]
async fn viewer_denied_edit_permission() {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let viewer = factory::create_account(db).await.unwrap();
    AuthSession::new(session)
        .set_account_id(viewer.id)
        .await
        .unwrap();

    let guard = AuthGuard::new(db, session);
    let err = guard.require(&[Permission::Edit]).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::AuthErr(AuthError::AccessDenied(_, _))
    ));
}

/// Tests that an editor passes Edit but not Admin.
#[tokio::test]
async fn editor_passes_edit_but_not_admin() {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let editor = factory::account::AccountFactory::new(db)
        .roles(&["EDITOR"])
        .build()
        .await
        .unwrap();
    AuthSession::new(session)
        .set_account_id(editor.id)
        .await
        .unwrap();

    let guard = AuthGuard::new(db, session);
    assert!(guard.require(&[Permission::Edit]).await.is_ok());
    assert!(guard.require(&[Permission::Admin]).await.is_err());
}

/// Tests that an admin passes every permission check.
#[tokio::test]
async fn admin_passes_all_checks() {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::create_admin_account(db).await.unwrap();
    AuthSession::new(session)
        .set_account_id(admin.id)
        .await
        .unwrap();

    let guard = AuthGuard::new(db, session);
    let account = guard
        .require(&[Permission::Admin, Permission::Edit])
        .await
        .unwrap();

    assert!(account.is_admin());
}
