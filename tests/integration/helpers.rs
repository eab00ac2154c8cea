//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};

use sharehub_core::config::AppConfig;
use sharehub_core::types::FileId;
use sharehub_entity::identity::AuthenticatedIdentity;
use sharehub_entity::share::{SharedResource, StorageAddress};
use sharehub_service::{CreateShareRequest, EngineState};

/// Test application context
pub struct TestApp {
    /// Every repository and service over in-memory stores
    pub state: EngineState,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            state: EngineState::in_memory(Arc::new(config)),
        }
    }

    /// Create a share for a fresh file owned by `owner`
    pub async fn share_file(
        &self,
        owner: &AuthenticatedIdentity,
        customize: impl FnOnce(&mut CreateShareRequest),
    ) -> SharedResource {
        let mut request = CreateShareRequest {
            file_id: FileId::new(),
            storage_address: StorageAddress::new(format!("blob/{}", FileId::new())),
            ..Default::default()
        };
        customize(&mut request);
        self.state
            .share_service
            .create_share(owner, request)
            .await
            .expect("Failed to create share")
    }

    /// Move a share's expiry into the past
    pub async fn expire(&self, share: &SharedResource) -> SharedResource {
        let mut expired = share.clone();
        expired.expires_at = Some(Utc::now() - Duration::seconds(1));
        self.state
            .share_repo
            .update(&expired)
            .await
            .expect("Failed to expire share")
    }

    /// Current stored copy of a share
    pub async fn reload(&self, share: &SharedResource) -> Option<SharedResource> {
        self.state
            .share_repo
            .find_by_id(&share.id)
            .await
            .expect("Failed to load share")
    }
}

/// An individual user on `plan`
pub fn user(id: &str, plan: &str) -> AuthenticatedIdentity {
    AuthenticatedIdentity::user(id, plan)
}

pub use sharehub_core::traits::Repository;
