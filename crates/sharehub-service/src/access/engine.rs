//! Access decision engine.
//!
//! Every request against a share token runs the same fixed sequence:
//! resolve, expiry, owner bypass, password, approval, view-only, download
//! cap. The first failing step decides the error kind.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use sharehub_auth::PasswordGate;
use sharehub_core::error::{AppError, ErrorKind};
use sharehub_core::types::ShareId;
use sharehub_database::repositories::ShareRepository;
use sharehub_entity::identity::AuthenticatedIdentity;
use sharehub_entity::share::{SharedResource, StorageAddress};

use crate::approval::ApprovalService;
use crate::download::DownloadCounter;
use crate::expiry::ExpiryEvaluator;

/// What the caller wants to do with a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessAction {
    /// Read metadata or preview.
    View,
    /// Transfer the file's bytes.
    Download,
}

/// Secrets presented alongside a share request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Share password, if one was supplied.
    pub password: Option<String>,
}

impl Credentials {
    /// Credentials carrying a password.
    pub fn with_password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
        }
    }
}

/// A successful access decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    /// The share that was resolved.
    pub share_id: ShareId,
    /// Where the file's bytes live.
    pub storage_address: StorageAddress,
    /// The action that was authorized.
    pub action: AccessAction,
    /// `true` when the owner passed via the bypass.
    pub owner_access: bool,
}

/// Decides whether a share may be viewed or downloaded.
#[derive(Debug, Clone)]
pub struct AccessEngine {
    share_repo: Arc<dyn ShareRepository>,
    approvals: ApprovalService,
    gate: PasswordGate,
}

impl AccessEngine {
    /// Creates a new access engine.
    pub fn new(share_repo: Arc<dyn ShareRepository>, approvals: ApprovalService) -> Self {
        Self {
            share_repo,
            approvals,
            gate: PasswordGate::new(),
        }
    }

    /// Runs the access sequence for `token` without side effects.
    pub async fn authorize(
        &self,
        action: AccessAction,
        token: &str,
        requester: Option<&AuthenticatedIdentity>,
        credentials: &Credentials,
    ) -> Result<AccessGrant, AppError> {
        let share = self.resolve(token).await?;
        self.decide(action, &share, requester, credentials).await
    }

    /// Authorizes a download, runs `transfer`, then records the download.
    ///
    /// The counter is bumped only after `transfer` succeeds, and a failure to
    /// record is logged rather than surfaced: the bytes already went out.
    /// Owner downloads are not counted.
    pub async fn download<T, F, Fut>(
        &self,
        token: &str,
        requester: Option<&AuthenticatedIdentity>,
        credentials: &Credentials,
        transfer: F,
    ) -> Result<T, AppError>
    where
        F: FnOnce(StorageAddress) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let grant = self
            .authorize(AccessAction::Download, token, requester, credentials)
            .await?;

        let served = transfer(grant.storage_address).await?;

        if !grant.owner_access {
            match self.share_repo.increment_download_count(&grant.share_id).await {
                Ok(count) => {
                    debug!(share_id = %grant.share_id, download_count = count, "Download recorded");
                }
                Err(e) => {
                    warn!(share_id = %grant.share_id, error = %e, "Download served but not recorded");
                }
            }
        }

        Ok(served)
    }

    async fn resolve(&self, token: &str) -> Result<SharedResource, AppError> {
        self.share_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))
    }

    async fn decide(
        &self,
        action: AccessAction,
        share: &SharedResource,
        requester: Option<&AuthenticatedIdentity>,
        credentials: &Credentials,
    ) -> Result<AccessGrant, AppError> {
        let grant = |owner_access| AccessGrant {
            share_id: share.id,
            storage_address: share.storage_address.clone(),
            action,
            owner_access,
        };

        if ExpiryEvaluator::is_expired(share.expires_at) {
            return Err(AppError::new(
                ErrorKind::ResourceExpired,
                "This share link has expired",
            ));
        }

        let requester_id = requester.map(|identity| &identity.id);
        if requester_id.is_some_and(|id| share.is_owned_by(id)) {
            return Ok(grant(true));
        }

        self.gate.verify(
            share.password_digest.as_deref().unwrap_or_default(),
            share.password_salt.as_deref().unwrap_or_default(),
            credentials.password.as_deref().unwrap_or_default(),
        )?;

        self.approvals.check_access(share, requester_id).await?;

        if action == AccessAction::Download {
            if share.view_only {
                return Err(AppError::new(
                    ErrorKind::DownloadNotAllowed,
                    "This share is view-only",
                ));
            }
            DownloadCounter::authorize(share.download_count, share.max_downloads)?;
        }

        info!(
            share_id = %share.id,
            action = ?action,
            requester = requester_id.map(|id| id.as_str()).unwrap_or("anonymous"),
            "Share access granted"
        );
        Ok(grant(false))
    }
}
