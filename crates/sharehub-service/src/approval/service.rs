//! Approval request lifecycle: request, decide, check, withdraw.
//!
//! States move `pending -> approved | rejected`. A reviewed request is never
//! re-opened; the requester may withdraw it and ask again.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use sharehub_core::error::{AppError, ErrorKind};
use sharehub_core::traits::Repository;
use sharehub_core::types::{ApprovalId, IdentityId};
use sharehub_database::repositories::{ApprovalRepository, ShareRepository};
use sharehub_entity::approval::{ApprovalRequest, ApprovalStatus};
use sharehub_entity::identity::AuthenticatedIdentity;
use sharehub_entity::share::SharedResource;

/// What a decision did to the stored request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// The status changed.
    Transitioned {
        /// Status before the decision.
        from: ApprovalStatus,
        /// Status after the decision.
        to: ApprovalStatus,
    },
    /// The request already had the requested status; nothing was written.
    Unchanged(ApprovalStatus),
}

/// Result of [`ApprovalService::decide`].
#[derive(Debug, Clone)]
pub struct Decision {
    /// The request as stored after the decision.
    pub request: ApprovalRequest,
    /// Whether the decision changed anything.
    pub outcome: DecisionOutcome,
}

impl Decision {
    /// Returns `true` when the stored status changed.
    pub fn is_transition(&self) -> bool {
        matches!(self.outcome, DecisionOutcome::Transitioned { .. })
    }
}

/// Manages approval requests against approval-gated shares.
#[derive(Debug, Clone)]
pub struct ApprovalService {
    approval_repo: Arc<dyn ApprovalRepository>,
    share_repo: Arc<dyn ShareRepository>,
}

impl ApprovalService {
    /// Creates a new approval service.
    pub fn new(
        approval_repo: Arc<dyn ApprovalRepository>,
        share_repo: Arc<dyn ShareRepository>,
    ) -> Self {
        Self {
            approval_repo,
            share_repo,
        }
    }

    /// Opens a pending request for `requester` on `share`.
    ///
    /// The share's current owner is captured on the request and never
    /// re-read.
    pub async fn request_access(
        &self,
        share: &SharedResource,
        requester: &IdentityId,
        reason: &str,
    ) -> Result<ApprovalRequest, AppError> {
        if !share.approval_required {
            return Err(AppError::new(
                ErrorKind::ApprovalNotRequired,
                "This share does not require approval",
            ));
        }
        if share.is_owned_by(requester) {
            return Err(AppError::new(
                ErrorKind::ApprovalNotRequired,
                "The owner does not need approval for their own share",
            ));
        }

        let request = ApprovalRequest::pending(
            share.id,
            share.owner_id.clone(),
            requester.clone(),
            reason,
        );
        let request = self.approval_repo.create(&request).await?;

        info!(
            approval_id = %request.id,
            share_id = %share.id,
            requester = %requester,
            "Approval requested"
        );
        Ok(request)
    }

    /// Same as [`Self::request_access`] but resolves the share by token.
    pub async fn request_access_by_token(
        &self,
        token: &str,
        requester: &IdentityId,
        reason: &str,
    ) -> Result<ApprovalRequest, AppError> {
        let share = self
            .share_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;
        self.request_access(&share, requester, reason).await
    }

    /// Sets a request's status on behalf of its owner (or an admin).
    ///
    /// `status` is the raw value supplied by the caller and must be one of
    /// `pending`, `approved` or `rejected`.
    pub async fn decide(
        &self,
        request_id: &ApprovalId,
        actor: &AuthenticatedIdentity,
        status: &str,
    ) -> Result<Decision, AppError> {
        let status: ApprovalStatus = status.parse()?;

        let mut request = self
            .approval_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Approval {request_id} not found")))?;

        if request.owner_id != actor.id && !actor.is_admin() {
            return Err(AppError::not_owner(
                "Only the share owner can review this request",
            ));
        }

        if request.status == status {
            debug!(approval_id = %request_id, status = %status, "Approval decision is a no-op");
            return Ok(Decision {
                request,
                outcome: DecisionOutcome::Unchanged(status),
            });
        }

        let from = std::mem::replace(&mut request.status, status.clone());
        request.reviewed_at = Some(Utc::now());
        let request = self.approval_repo.update(&request).await?;

        info!(
            approval_id = %request_id,
            actor = %actor.id,
            from = %from,
            to = %status,
            "Approval decided"
        );
        Ok(Decision {
            request,
            outcome: DecisionOutcome::Transitioned { from, to: status },
        })
    }

    /// Fails unless `requester` may pass the approval gate of `share`.
    ///
    /// An anonymous requester on a gated share gets `ApprovalRequired`.
    pub async fn check_access(
        &self,
        share: &SharedResource,
        requester: Option<&IdentityId>,
    ) -> Result<(), AppError> {
        if !share.approval_required {
            return Ok(());
        }
        let Some(requester) = requester else {
            return Err(Self::approval_required());
        };
        if share.is_owned_by(requester) {
            return Ok(());
        }

        let request = self
            .approval_repo
            .find_by_pair(&share.id, requester)
            .await?
            .ok_or_else(Self::approval_required)?;

        match request.status {
            ApprovalStatus::Approved => Ok(()),
            ApprovalStatus::Pending => Err(AppError::new(
                ErrorKind::ApprovalPending,
                "Your access request is awaiting the owner's review",
            )),
            ApprovalStatus::Rejected => Err(AppError::new(
                ErrorKind::ApprovalRejected,
                "The owner rejected your access request",
            )),
            ApprovalStatus::Unrecognized(raw) => Err(AppError::new(
                ErrorKind::ApprovalCorrupt,
                format!("Stored approval status '{raw}' is not recognized"),
            )),
        }
    }

    /// Deletes a request. Only the requester who made it may withdraw it.
    pub async fn withdraw(
        &self,
        request_id: &ApprovalId,
        requester: &IdentityId,
    ) -> Result<(), AppError> {
        let request = self
            .approval_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Approval {request_id} not found")))?;

        if &request.requester_id != requester {
            return Err(AppError::not_owner(
                "Only the requester can withdraw this request",
            ));
        }

        self.approval_repo.delete(request_id).await?;
        info!(approval_id = %request_id, requester = %requester, "Approval withdrawn");
        Ok(())
    }

    /// Requests addressed to `owner`, newest first.
    pub async fn list_incoming(&self, owner: &IdentityId) -> Result<Vec<ApprovalRequest>, AppError> {
        self.approval_repo.find_by_owner(owner).await
    }

    /// Requests made by `requester`, newest first.
    pub async fn list_outgoing(
        &self,
        requester: &IdentityId,
    ) -> Result<Vec<ApprovalRequest>, AppError> {
        self.approval_repo.find_by_requester(requester).await
    }

    fn approval_required() -> AppError {
        AppError::new(
            ErrorKind::ApprovalRequired,
            "This share requires the owner's approval; request access first",
        )
    }
}
