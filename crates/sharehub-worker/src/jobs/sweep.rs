//! Expiry sweep: removes lapsed shares and long-reviewed approvals.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing;

use sharehub_core::error::AppError;
use sharehub_core::traits::Repository;
use sharehub_database::repositories::{ApprovalRepository, ShareRepository};
use sharehub_service::ExpiryEvaluator;

/// Counts of what one sweep removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Expired shares deleted.
    pub shares_removed: u64,
    /// Approval requests deleted together with those shares.
    pub share_approvals_removed: u64,
    /// Reviewed approval requests deleted for age.
    pub stale_approvals_removed: u64,
}

/// Deletes expired shares and reviewed approvals past retention.
#[derive(Debug, Clone)]
pub struct ExpirySweep {
    /// Share repository
    share_repo: Arc<dyn ShareRepository>,
    /// Approval repository
    approval_repo: Arc<dyn ApprovalRepository>,
    /// How long a reviewed approval is kept
    approval_retention: Duration,
}

impl ExpirySweep {
    /// Create a new sweep
    pub fn new(
        share_repo: Arc<dyn ShareRepository>,
        approval_repo: Arc<dyn ApprovalRepository>,
        approval_retention_days: i64,
    ) -> Self {
        Self {
            share_repo,
            approval_repo,
            approval_retention: Duration::days(approval_retention_days),
        }
    }

    /// Run one sweep as of `now`.
    ///
    /// A failure on one record is logged and skipped; only a failed listing
    /// aborts the sweep.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<SweepReport, AppError> {
        tracing::info!("Running expiry sweep");
        let mut report = SweepReport::default();

        let candidates = self.share_repo.find_with_expiry().await?;
        for share in candidates
            .iter()
            .filter(|share| ExpiryEvaluator::is_expired_at(share.expires_at, now))
        {
            match self.approval_repo.delete_by_share(&share.id).await {
                Ok(count) => report.share_approvals_removed += count,
                Err(e) => {
                    tracing::warn!("Failed to delete approvals of share {}: {}", share.id, e);
                    continue;
                }
            }
            match self.share_repo.delete(&share.id).await {
                Ok(true) => report.shares_removed += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!("Failed to delete expired share {}: {}", share.id, e),
            }
        }

        let cutoff = now - self.approval_retention;
        for request in self.approval_repo.find_reviewed_before(cutoff).await? {
            match self.approval_repo.delete(&request.id).await {
                Ok(true) => report.stale_approvals_removed += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!("Failed to delete approval {}: {}", request.id, e),
            }
        }

        tracing::info!(
            shares_removed = report.shares_removed,
            share_approvals_removed = report.share_approvals_removed,
            stale_approvals_removed = report.stale_approvals_removed,
            "Expiry sweep complete"
        );
        Ok(report)
    }
}
