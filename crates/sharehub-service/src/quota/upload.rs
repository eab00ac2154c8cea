//! Upload orchestration against a principal's storage quota.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use sharehub_core::error::{AppError, ErrorKind};
use sharehub_core::traits::Repository;
use sharehub_core::types::IdentityId;
use sharehub_database::repositories::QuotaRepository;
use sharehub_entity::quota::{PrincipalRef, QuotaAccount, QuotaUsage};

use super::calculator::QuotaCalculator;
use super::plan::PlanCatalog;

/// Outcome of a committed upload.
#[derive(Debug, Clone)]
pub struct UploadReceipt<T> {
    /// Whatever the physical write returned (usually a storage address).
    pub stored: T,
    /// Cumulative usage after this upload.
    pub used_bytes: u64,
    /// When the uploaded file falls out of retention.
    pub expires_at: DateTime<Utc>,
}

/// Charges uploads to quota accounts.
#[derive(Debug, Clone)]
pub struct UploadService {
    quota_repo: Arc<dyn QuotaRepository>,
    catalog: Arc<PlanCatalog>,
    calculator: QuotaCalculator,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(quota_repo: Arc<dyn QuotaRepository>, catalog: Arc<PlanCatalog>) -> Self {
        Self {
            quota_repo,
            calculator: QuotaCalculator::new(Arc::clone(&catalog)),
            catalog,
        }
    }

    /// Uploads `size` bytes on behalf of `actor` into `principal`'s account.
    ///
    /// `write` performs the physical write and runs only after every check
    /// passed. Usage is persisted after `write` succeeds; if the commit then
    /// loses a race with another upload this returns `Conflict` and the
    /// caller must discard what `write` stored.
    pub async fn upload<T, F, Fut>(
        &self,
        principal: &PrincipalRef,
        actor: &IdentityId,
        size: u64,
        write: F,
    ) -> Result<UploadReceipt<T>, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let account = self.load(principal).await?;
        if !account.admits(actor) {
            return Err(AppError::not_owner(format!(
                "{actor} may not upload into {principal}"
            )));
        }

        let plan = self.catalog.resolve(principal.kind, &account.plan)?;
        if size > plan.limits.max_upload_bytes {
            return Err(AppError::new(
                ErrorKind::FileTooLarge,
                format!(
                    "File size {size} bytes exceeds the {} plan's upload limit of {} bytes",
                    plan.tier, plan.limits.max_upload_bytes
                ),
            ));
        }

        let new_used = self
            .calculator
            .evaluate(principal.kind, &account.plan, account.used_bytes, size)?;

        let stored = write().await?;

        if let Err(e) = self
            .quota_repo
            .commit_usage(principal, account.used_bytes, new_used)
            .await
        {
            warn!(principal = %principal, size, error = %e, "Upload stored but usage commit failed");
            return Err(e);
        }

        info!(
            principal = %principal,
            actor = %actor,
            size,
            used_bytes = new_used,
            "Upload charged"
        );

        Ok(UploadReceipt {
            stored,
            used_bytes: new_used,
            expires_at: Utc::now() + Duration::days(plan.limits.file_retention_days),
        })
    }

    /// Gives back `bytes` of usage, clamping at zero.
    pub async fn release(&self, principal: &PrincipalRef, bytes: u64) -> Result<u64, AppError> {
        let account = self.load(principal).await?;
        let new_used = account.used_bytes.saturating_sub(bytes);
        self.quota_repo
            .commit_usage(principal, account.used_bytes, new_used)
            .await?;
        info!(principal = %principal, released = bytes, used_bytes = new_used, "Usage released");
        Ok(new_used)
    }

    /// Returns the principal's usage against its plan ceiling.
    pub async fn usage(&self, principal: &PrincipalRef) -> Result<QuotaUsage, AppError> {
        let account = self.load(principal).await?;
        let plan = self.catalog.resolve(principal.kind, &account.plan)?;
        Ok(QuotaUsage::new(plan.limits.storage_bytes, account.used_bytes))
    }

    async fn load(&self, principal: &PrincipalRef) -> Result<QuotaAccount, AppError> {
        self.quota_repo
            .find_by_id(principal)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Quota account for {principal} not found")))
    }
}
