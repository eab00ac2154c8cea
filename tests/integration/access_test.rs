//! Integration tests for the access decision sequence.

mod helpers;

use helpers::{Repository, TestApp, user};
use sharehub_core::error::ErrorKind;
use sharehub_service::{AccessAction, Credentials};

#[tokio::test]
async fn test_three_downloads_then_limit() {
    let app = TestApp::new();
    let owner = user("u1", "plus");
    let share = app
        .share_file(&owner, |req| req.max_downloads = Some(3))
        .await;
    let guest = user("u2", "free");
    let engine = &app.state.access_engine;

    for _ in 0..3 {
        engine
            .download(&share.token, Some(&guest), &Credentials::default(), |_| async {
                Ok(())
            })
            .await
            .unwrap();
    }
    assert_eq!(app.reload(&share).await.unwrap().download_count, 3);

    let err = engine
        .download(&share.token, Some(&guest), &Credentials::default(), |_| async {
            Ok(())
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DownloadLimitExceeded);
    assert!(err.message.contains('3'));

    // Viewing is not capped.
    engine
        .authorize(AccessAction::View, &share.token, Some(&guest), &Credentials::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_password_protected_share() {
    let app = TestApp::new();
    let owner = user("u1", "free");
    let share = app
        .share_file(&owner, |req| req.password = Some("hunter2".to_string()))
        .await;
    let engine = &app.state.access_engine;

    let err = engine
        .authorize(AccessAction::Download, &share.token, None, &Credentials::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredential);
    assert_eq!(err.message, "Password required");

    let err = engine
        .authorize(
            AccessAction::Download,
            &share.token,
            None,
            &Credentials::with_password("hunter3"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.message, "Password incorrect");

    let grant = engine
        .authorize(
            AccessAction::Download,
            &share.token,
            None,
            &Credentials::with_password("hunter2"),
        )
        .await
        .unwrap();
    assert_eq!(grant.storage_address, share.storage_address);
    assert!(!grant.owner_access);

    // The owner needs no password.
    let grant = engine
        .authorize(AccessAction::Download, &share.token, Some(&owner), &Credentials::default())
        .await
        .unwrap();
    assert!(grant.owner_access);
}

#[tokio::test]
async fn test_expired_share_refuses_everyone() {
    let app = TestApp::new();
    let owner = user("u1", "plus");
    let share = app
        .share_file(&owner, |req| req.password = Some("pw".to_string()))
        .await;
    app.expire(&share).await;

    for requester in [None, Some(&owner)] {
        let err = app
            .state
            .access_engine
            .authorize(
                AccessAction::View,
                &share.token,
                requester,
                &Credentials::with_password("pw"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ResourceExpired);
    }
}

#[tokio::test]
async fn test_corrupt_password_record_is_internal() {
    let app = TestApp::new();
    let owner = user("u1", "free");
    let share = app
        .share_file(&owner, |req| req.password = Some("pw".to_string()))
        .await;

    let mut broken = share.clone();
    broken.password_salt = Some("not hex".to_string());
    app.state.share_repo.update(&broken).await.unwrap();

    let err = app
        .state
        .access_engine
        .authorize(
            AccessAction::View,
            &share.token,
            None,
            &Credentials::with_password("pw"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::CorruptCredentialRecord);
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let app = TestApp::new();
    let err = app
        .state
        .access_engine
        .authorize(AccessAction::View, "missing", None, &Credentials::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
