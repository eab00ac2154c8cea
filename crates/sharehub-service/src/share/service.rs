//! Share CRUD service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use sharehub_auth::{LinkTokenGenerator, PasswordGate};
use sharehub_core::config::ShareConfig;
use sharehub_core::error::{AppError, ErrorKind};
use sharehub_core::traits::Repository;
use sharehub_core::types::{FileId, IdentityId, PrincipalKind, ShareId};
use sharehub_database::repositories::{ApprovalRepository, ShareRepository};
use sharehub_entity::identity::AuthenticatedIdentity;
use sharehub_entity::share::{SharedResource, StorageAddress, UNLIMITED_DOWNLOADS};

use crate::quota::{PlanCatalog, ResolvedPlan};

/// Manages share creation, listing, and revocation.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share repository.
    share_repo: Arc<dyn ShareRepository>,
    /// Approval repository, cleared alongside revoked shares.
    approval_repo: Arc<dyn ApprovalRepository>,
    /// Plan lookup for feature gating.
    catalog: Arc<PlanCatalog>,
    /// Token generator for share links.
    tokens: LinkTokenGenerator,
    /// Password hasher for password-protected shares.
    gate: PasswordGate,
    /// Expiry applied when none is given.
    default_expiry: Duration,
}

/// Request to create a share link for a file.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CreateShareRequest {
    /// File being shared. The caller has already checked the requester owns it.
    pub file_id: FileId,
    /// Where the file's bytes live.
    pub storage_address: StorageAddress,
    /// Password protection (optional, empty means none).
    pub password: Option<String>,
    /// Require owner approval per requester.
    #[serde(default)]
    pub approval_required: bool,
    /// Serve previews only.
    #[serde(default)]
    pub view_only: bool,
    /// Download cap (`None` or `-1` = unlimited).
    pub max_downloads: Option<i64>,
    /// Expiration time (optional).
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        share_repo: Arc<dyn ShareRepository>,
        approval_repo: Arc<dyn ApprovalRepository>,
        catalog: Arc<PlanCatalog>,
        config: &ShareConfig,
    ) -> Self {
        Self {
            share_repo,
            approval_repo,
            catalog,
            tokens: LinkTokenGenerator::new(config.token_bytes),
            gate: PasswordGate::new(),
            default_expiry: Duration::days(config.default_expiry_days),
        }
    }

    /// Lists shares created by `identity`, newest first.
    pub async fn list_shares(
        &self,
        identity: &AuthenticatedIdentity,
    ) -> Result<Vec<SharedResource>, AppError> {
        self.share_repo.find_by_owner(&identity.id).await
    }

    /// Creates a share link for a file.
    ///
    /// Approval gating, download caps and view-only mode need a plan with
    /// share features. A custom expiry on a plan without them is replaced by
    /// the default expiry.
    pub async fn create_share(
        &self,
        identity: &AuthenticatedIdentity,
        req: CreateShareRequest,
    ) -> Result<SharedResource, AppError> {
        let now = Utc::now();
        let max_downloads = req.max_downloads.unwrap_or(UNLIMITED_DOWNLOADS);
        if max_downloads < UNLIMITED_DOWNLOADS {
            return Err(AppError::validation(format!(
                "max_downloads must be -1 (unlimited) or at least 0, got {max_downloads}"
            )));
        }

        if req.approval_required {
            self.require_features(identity, "approval-required links")?;
        }
        if max_downloads != UNLIMITED_DOWNLOADS {
            self.require_features(identity, "download limits")?;
        }
        if req.view_only {
            self.require_features(identity, "view-only links")?;
        }

        let expires_at = match req.expires_at {
            None => now + self.default_expiry,
            Some(at) => {
                if self.plan_for(identity)?.limits.share_features {
                    if at <= now {
                        return Err(AppError::validation("Share expiry must be in the future"));
                    }
                    at
                } else {
                    now + self.default_expiry
                }
            }
        };

        let (password_digest, password_salt) = match req.password.as_deref() {
            Some(password) if !password.is_empty() => {
                let digest = self.gate.digest(password);
                (Some(digest.digest), Some(digest.salt))
            }
            _ => (None, None),
        };

        let share = SharedResource {
            id: ShareId::new(),
            token: self.tokens.generate(),
            file_id: req.file_id,
            owner_id: identity.id.clone(),
            storage_address: req.storage_address,
            password_digest,
            password_salt,
            approval_required: req.approval_required,
            view_only: req.view_only,
            max_downloads,
            download_count: 0,
            expires_at: Some(expires_at),
            created_at: now,
        };

        let share = self.share_repo.create(&share).await?;

        info!(
            user_id = %identity.id,
            share_id = %share.id,
            file_id = %share.file_id,
            approval_required = share.approval_required,
            protected = share.is_password_protected(),
            "Share created"
        );

        Ok(share)
    }

    /// Gets a share by ID (only the owner or an admin can view it).
    pub async fn get_share(
        &self,
        identity: &AuthenticatedIdentity,
        share_id: &ShareId,
    ) -> Result<SharedResource, AppError> {
        let share = self
            .share_repo
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        if !share.is_owned_by(&identity.id) && !identity.is_admin() {
            return Err(AppError::not_owner("You can only view your own shares"));
        }

        Ok(share)
    }

    /// Deletes a share and every approval request attached to it.
    pub async fn revoke_share(
        &self,
        identity: &AuthenticatedIdentity,
        share_id: &ShareId,
    ) -> Result<(), AppError> {
        let share = self.get_share(identity, share_id).await?;
        let approvals = self.purge(&share).await?;

        info!(
            user_id = %identity.id,
            share_id = %share_id,
            approvals,
            "Share revoked"
        );

        Ok(())
    }

    /// Removes the share of a deleted file, if it had one.
    pub async fn remove_for_file(&self, file_id: &FileId) -> Result<bool, AppError> {
        let Some(share) = self.share_repo.find_by_file(file_id).await? else {
            return Ok(false);
        };
        self.purge(&share).await?;
        info!(file_id = %file_id, share_id = %share.id, "Share removed with its file");
        Ok(true)
    }

    /// Returns whether `owner` has any live share for `file_id`.
    pub async fn is_shared(&self, owner: &IdentityId, file_id: &FileId) -> Result<bool, AppError> {
        Ok(self
            .share_repo
            .find_by_file(file_id)
            .await?
            .is_some_and(|share| share.is_owned_by(owner)))
    }

    async fn purge(&self, share: &SharedResource) -> Result<u64, AppError> {
        let approvals = self.approval_repo.delete_by_share(&share.id).await?;
        self.share_repo.delete(&share.id).await?;
        Ok(approvals)
    }

    fn plan_for(&self, identity: &AuthenticatedIdentity) -> Result<ResolvedPlan, AppError> {
        self.catalog.resolve(PrincipalKind::Individual, &identity.plan)
    }

    fn require_features(
        &self,
        identity: &AuthenticatedIdentity,
        feature: &str,
    ) -> Result<(), AppError> {
        let plan = self.plan_for(identity)?;
        if plan.limits.share_features {
            return Ok(());
        }
        Err(AppError::new(
            ErrorKind::FeatureNotInPlan,
            format!("The '{}' plan does not include {feature}", plan.tier),
        ))
    }
}
