//! Approval request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sharehub_core::types::{ApprovalId, IdentityId, ShareId};

use super::status::ApprovalStatus;

/// One requester's ask to access one approval-gated share.
///
/// At most one request exists per (`share_id`, `requester_id`) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Unique identifier.
    pub id: ApprovalId,
    /// The share access is requested for.
    pub share_id: ShareId,
    /// Share owner captured at creation; never rewritten afterwards.
    pub owner_id: IdentityId,
    /// Identity asking for access.
    pub requester_id: IdentityId,
    /// Current status.
    pub status: ApprovalStatus,
    /// Free-text reason supplied by the requester.
    #[serde(default)]
    pub reason: String,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the owner last decided on it.
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl ApprovalRequest {
    /// Builds a new pending request.
    pub fn pending(
        share_id: ShareId,
        owner_id: IdentityId,
        requester_id: IdentityId,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: ApprovalId::new(),
            share_id,
            owner_id,
            requester_id,
            status: ApprovalStatus::Pending,
            reason: reason.into(),
            created_at: Utc::now(),
            reviewed_at: None,
        }
    }
}
