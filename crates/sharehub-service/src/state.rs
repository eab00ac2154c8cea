//! Engine state shared by every caller.

use std::sync::Arc;

use sharehub_core::config::AppConfig;
use sharehub_database::repositories::{
    ApprovalRepository, MemoryApprovalRepository, MemoryQuotaRepository, MemoryShareRepository,
    QuotaRepository, ShareRepository,
};

use crate::access::AccessEngine;
use crate::approval::ApprovalService;
use crate::quota::{AccountService, PlanCatalog, UploadService};
use crate::share::ShareService;

/// Every repository and service, wired once at startup.
///
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct EngineState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Plan tier lookup
    pub catalog: Arc<PlanCatalog>,

    // ── Repositories ─────────────────────────────────────────
    /// Share repository
    pub share_repo: Arc<dyn ShareRepository>,
    /// Approval repository
    pub approval_repo: Arc<dyn ApprovalRepository>,
    /// Quota account repository
    pub quota_repo: Arc<dyn QuotaRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Share settings service
    pub share_service: Arc<ShareService>,
    /// Approval state machine
    pub approval_service: Arc<ApprovalService>,
    /// Access decision engine
    pub access_engine: Arc<AccessEngine>,
    /// Upload orchestration
    pub upload_service: Arc<UploadService>,
    /// Quota accounts and team rosters
    pub account_service: Arc<AccountService>,
}

impl EngineState {
    /// Wires services over the given repositories.
    pub fn new(
        config: Arc<AppConfig>,
        share_repo: Arc<dyn ShareRepository>,
        approval_repo: Arc<dyn ApprovalRepository>,
        quota_repo: Arc<dyn QuotaRepository>,
    ) -> Self {
        let catalog = Arc::new(PlanCatalog::new(&config.plans));

        let approval_service =
            ApprovalService::new(Arc::clone(&approval_repo), Arc::clone(&share_repo));
        let access_engine = AccessEngine::new(Arc::clone(&share_repo), approval_service.clone());
        let share_service = ShareService::new(
            Arc::clone(&share_repo),
            Arc::clone(&approval_repo),
            Arc::clone(&catalog),
            &config.share,
        );
        let upload_service = UploadService::new(Arc::clone(&quota_repo), Arc::clone(&catalog));
        let account_service = AccountService::new(Arc::clone(&quota_repo), Arc::clone(&catalog));

        Self {
            config,
            catalog,
            share_repo,
            approval_repo,
            quota_repo,
            share_service: Arc::new(share_service),
            approval_service: Arc::new(approval_service),
            access_engine: Arc::new(access_engine),
            upload_service: Arc::new(upload_service),
            account_service: Arc::new(account_service),
        }
    }

    /// Wires services over fresh in-memory repositories.
    pub fn in_memory(config: Arc<AppConfig>) -> Self {
        Self::new(
            config,
            Arc::new(MemoryShareRepository::new()),
            Arc::new(MemoryApprovalRepository::new()),
            Arc::new(MemoryQuotaRepository::new()),
        )
    }
}
