//! Integration tests for upload accounting.

mod helpers;

use helpers::{TestApp, user};
use sharehub_core::error::ErrorKind;
use sharehub_core::types::IdentityId;
use sharehub_database::repositories::QuotaRepository;
use sharehub_entity::quota::PrincipalRef;

const GIB: u64 = 1024 * 1024 * 1024;

#[tokio::test]
async fn test_lowest_tier_headroom_message() {
    let app = TestApp::new();
    let principal = PrincipalRef::individual("u1");
    let actor = IdentityId::new("u1");
    app.state
        .account_service
        .open_account(principal.clone(), "free", None)
        .await
        .unwrap();

    let used = 2 * GIB - 100;
    app.state
        .quota_repo
        .commit_usage(&principal, 0, used)
        .await
        .unwrap();

    let err = app
        .state
        .upload_service
        .upload(&principal, &actor, 150, || async { Ok(()) })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::QuotaExceeded);
    assert!(err.message.contains("150"));
    assert!(err.message.contains("100"));

    let receipt = app
        .state
        .upload_service
        .upload(&principal, &actor, 100, || async { Ok("blob/last") })
        .await
        .unwrap();
    assert_eq!(receipt.used_bytes, 2 * GIB);

    let usage = app.state.upload_service.usage(&principal).await.unwrap();
    assert!(usage.is_exhausted());
}

#[tokio::test]
async fn test_team_upload_flow() {
    let app = TestApp::new();
    let team = PrincipalRef::team("acme");
    app.state
        .account_service
        .open_account(team.clone(), "free", Some(IdentityId::new("alice")))
        .await
        .unwrap();
    app.state
        .account_service
        .add_member(&team, &user("alice", "free"), IdentityId::new("bob"))
        .await
        .unwrap();

    let receipt = app
        .state
        .upload_service
        .upload(&team, &IdentityId::new("bob"), 1024, || async { Ok(()) })
        .await
        .unwrap();
    assert_eq!(receipt.used_bytes, 1024);

    let err = app
        .state
        .upload_service
        .upload(&team, &IdentityId::new("eve"), 1024, || async { Ok(()) })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotOwner);
}

#[tokio::test]
async fn test_release_is_explicit() {
    let app = TestApp::new();
    let principal = PrincipalRef::individual("u1");
    let actor = IdentityId::new("u1");
    app.state
        .account_service
        .open_account(principal.clone(), "plus", None)
        .await
        .unwrap();

    app.state
        .upload_service
        .upload(&principal, &actor, 4096, || async { Ok(()) })
        .await
        .unwrap();
    let remaining = app
        .state
        .upload_service
        .release(&principal, 1024)
        .await
        .unwrap();
    assert_eq!(remaining, 3072);
}

#[tokio::test]
async fn test_downgrade_below_usage_refuses_uploads() {
    let app = TestApp::new();
    let principal = PrincipalRef::individual("u1");
    let owner = user("u1", "plus");
    app.state
        .account_service
        .open_account(principal.clone(), "plus", None)
        .await
        .unwrap();
    app.state
        .quota_repo
        .commit_usage(&principal, 0, 3 * GIB)
        .await
        .unwrap();

    let err = app
        .state
        .account_service
        .change_plan(&principal, &user("u2", "plus"), "free")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotOwner);

    app.state
        .account_service
        .change_plan(&principal, &owner, "free")
        .await
        .unwrap();

    let err = app
        .state
        .upload_service
        .upload(&principal, &owner.id, 1, || async { Ok(()) })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::QuotaExceeded);

    let usage = app.state.upload_service.usage(&principal).await.unwrap();
    assert_eq!(usage.used_bytes, 3 * GIB);
    assert_eq!(usage.total_bytes, 2 * GIB);
}

#[tokio::test]
async fn test_strangers_cannot_join_a_team() {
    let app = TestApp::new();
    let team = PrincipalRef::team("acme");
    app.state
        .account_service
        .open_account(team.clone(), "free", Some(IdentityId::new("alice")))
        .await
        .unwrap();

    let err = app
        .state
        .account_service
        .add_member(&team, &user("mallory", "free"), IdentityId::new("mallory"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotOwner);

    let err = app
        .state
        .upload_service
        .upload(&team, &IdentityId::new("mallory"), 1024, || async { Ok(()) })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotOwner);
}
