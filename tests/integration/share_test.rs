//! Integration tests for share settings.

mod helpers;

use helpers::{Repository, TestApp, user};
use sharehub_core::error::ErrorKind;
use sharehub_core::types::IdentityId;
use sharehub_service::{AccessAction, CreateShareRequest, Credentials};

#[tokio::test]
async fn test_view_only_share() {
    let app = TestApp::new();
    let owner = user("u1", "premium");
    let share = app.share_file(&owner, |req| req.view_only = true).await;
    let guest = user("u2", "free");

    app.state
        .access_engine
        .authorize(AccessAction::View, &share.token, Some(&guest), &Credentials::default())
        .await
        .unwrap();
    let err = app
        .state
        .access_engine
        .authorize(AccessAction::Download, &share.token, Some(&guest), &Credentials::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DownloadNotAllowed);
}

#[tokio::test]
async fn test_free_plan_cannot_gate() {
    let app = TestApp::new();
    let owner = user("u1", "free");
    let request = CreateShareRequest {
        approval_required: true,
        ..Default::default()
    };
    let err = app
        .state
        .share_service
        .create_share(&owner, request)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::FeatureNotInPlan);
}

#[tokio::test]
async fn test_revoke_removes_token_and_approvals() {
    let app = TestApp::new();
    let owner = user("u1", "plus");
    let share = app
        .share_file(&owner, |req| req.approval_required = true)
        .await;
    app.state
        .approval_service
        .request_access(&share, &IdentityId::new("u2"), "")
        .await
        .unwrap();

    app.state
        .share_service
        .revoke_share(&owner, &share.id)
        .await
        .unwrap();

    assert_eq!(app.state.approval_repo.count().await.unwrap(), 0);
    let err = app
        .state
        .access_engine
        .authorize(AccessAction::View, &share.token, None, &Credentials::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_tokens_are_unique() {
    let app = TestApp::new();
    let owner = user("u1", "free");
    let a = app.share_file(&owner, |_| {}).await;
    let b = app.share_file(&owner, |_| {}).await;
    assert_ne!(a.token, b.token);
    assert_eq!(app.state.share_service.list_shares(&owner).await.unwrap().len(), 2);
}
