//! Integration tests for the approval workflow.

mod helpers;

use helpers::{TestApp, user};
use sharehub_core::error::ErrorKind;
use sharehub_entity::approval::ApprovalStatus;
use sharehub_service::{AccessAction, Credentials, DecisionOutcome};

#[tokio::test]
async fn test_request_review_and_access() {
    let app = TestApp::new();
    let u1 = user("u1", "plus");
    let u2 = user("u2", "free");
    let share = app
        .share_file(&u1, |req| req.approval_required = true)
        .await;
    let approvals = &app.state.approval_service;

    let err = approvals.check_access(&share, Some(&u2.id)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApprovalRequired);

    let request = approvals
        .request_access_by_token(&share.token, &u2.id, "need it for the audit")
        .await
        .unwrap();
    assert_eq!(request.status, ApprovalStatus::Pending);

    let err = approvals.check_access(&share, Some(&u2.id)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApprovalPending);

    let decision = approvals.decide(&request.id, &u1, "approved").await.unwrap();
    assert_eq!(
        decision.outcome,
        DecisionOutcome::Transitioned {
            from: ApprovalStatus::Pending,
            to: ApprovalStatus::Approved,
        }
    );

    approvals.check_access(&share, Some(&u2.id)).await.unwrap();
    app.state
        .access_engine
        .authorize(AccessAction::Download, &share.token, Some(&u2), &Credentials::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_duplicate_request_even_after_rejection() {
    let app = TestApp::new();
    let u1 = user("u1", "plus");
    let u2 = user("u2", "free");
    let share = app
        .share_file(&u1, |req| req.approval_required = true)
        .await;
    let approvals = &app.state.approval_service;

    let request = approvals.request_access(&share, &u2.id, "").await.unwrap();
    approvals.decide(&request.id, &u1, "rejected").await.unwrap();

    let err = approvals
        .request_access(&share, &u2.id, "please reconsider")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateRequest);

    let err = app
        .state
        .access_engine
        .authorize(AccessAction::View, &share.token, Some(&u2), &Credentials::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApprovalRejected);

    // The owner is unaffected by a rejected request on file.
    app.state
        .access_engine
        .authorize(AccessAction::View, &share.token, Some(&u1), &Credentials::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_only_owner_decides() {
    let app = TestApp::new();
    let u1 = user("u1", "plus");
    let u2 = user("u2", "free");
    let share = app
        .share_file(&u1, |req| req.approval_required = true)
        .await;
    let approvals = &app.state.approval_service;
    let request = approvals.request_access(&share, &u2.id, "").await.unwrap();

    let err = approvals.decide(&request.id, &u2, "approved").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotOwner);

    let decision = approvals.decide(&request.id, &u1, "pending").await.unwrap();
    assert!(!decision.is_transition());
}

#[tokio::test]
async fn test_anonymous_requester_needs_approval() {
    let app = TestApp::new();
    let u1 = user("u1", "premium");
    let share = app
        .share_file(&u1, |req| req.approval_required = true)
        .await;

    let err = app
        .state
        .access_engine
        .authorize(AccessAction::View, &share.token, None, &Credentials::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApprovalRequired);
}
