//! Integration tests for the expiry sweep.

mod helpers;

use std::sync::Arc;

use chrono::Utc;

use helpers::{Repository, TestApp, user};
use sharehub_core::types::IdentityId;
use sharehub_worker::ExpirySweep;

#[tokio::test]
async fn test_sweep_deletes_expired_share_and_its_requests() {
    let app = TestApp::new();
    let owner = user("u1", "plus");
    let expired = app
        .share_file(&owner, |req| req.approval_required = true)
        .await;
    let live = app.share_file(&owner, |_| {}).await;

    app.state
        .approval_service
        .request_access(&expired, &IdentityId::new("u2"), "")
        .await
        .unwrap();
    app.expire(&expired).await;

    let sweep = ExpirySweep::new(
        Arc::clone(&app.state.share_repo),
        Arc::clone(&app.state.approval_repo),
        app.state.config.worker.approval_retention_days,
    );
    let report = sweep.run(Utc::now()).await.unwrap();

    assert_eq!(report.shares_removed, 1);
    assert_eq!(report.share_approvals_removed, 1);
    assert!(app.reload(&expired).await.is_none());
    assert!(app.reload(&live).await.is_some());
    assert_eq!(app.state.approval_repo.count().await.unwrap(), 0);
}
