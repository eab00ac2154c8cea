//! Approval request repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use sharehub_core::error::{AppError, ErrorKind};
use sharehub_core::result::AppResult;
use sharehub_core::traits::Repository;
use sharehub_core::types::{ApprovalId, IdentityId, ShareId};
use sharehub_entity::approval::ApprovalRequest;

/// Approval-specific queries on top of the generic CRUD operations.
///
/// `create` is uniqueness-checked: a second request for the same
/// (share, requester) pair fails with `DuplicateRequest` whatever the status
/// of the first.
#[async_trait]
pub trait ApprovalRepository: Repository<ApprovalRequest, ApprovalId> + std::fmt::Debug {
    /// Find the request a requester made for a share.
    async fn find_by_pair(
        &self,
        share_id: &ShareId,
        requester: &IdentityId,
    ) -> AppResult<Option<ApprovalRequest>>;

    /// List requests addressed to an owner, newest first.
    async fn find_by_owner(&self, owner: &IdentityId) -> AppResult<Vec<ApprovalRequest>>;

    /// List requests a requester has made, newest first.
    async fn find_by_requester(&self, requester: &IdentityId) -> AppResult<Vec<ApprovalRequest>>;

    /// Delete every request attached to a share. Returns how many went.
    async fn delete_by_share(&self, share_id: &ShareId) -> AppResult<u64>;

    /// List reviewed requests whose review instant is before `cutoff`.
    async fn find_reviewed_before(&self, cutoff: DateTime<Utc>)
    -> AppResult<Vec<ApprovalRequest>>;
}

/// In-memory approval store with a (share, requester) uniqueness index.
#[derive(Debug, Default)]
pub struct MemoryApprovalRepository {
    requests: DashMap<ApprovalId, ApprovalRequest>,
    by_pair: DashMap<(ShareId, IdentityId), ApprovalId>,
}

impl MemoryApprovalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted(&self, keep: impl Fn(&ApprovalRequest) -> bool) -> Vec<ApprovalRequest> {
        let mut requests: Vec<ApprovalRequest> = self
            .requests
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }
}

#[async_trait]
impl Repository<ApprovalRequest, ApprovalId> for MemoryApprovalRepository {
    async fn find_by_id(&self, id: &ApprovalId) -> AppResult<Option<ApprovalRequest>> {
        Ok(self.requests.get(id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, request: &ApprovalRequest) -> AppResult<ApprovalRequest> {
        let key = (request.share_id, request.requester_id.clone());
        match self.by_pair.entry(key) {
            Entry::Occupied(_) => Err(AppError::new(
                ErrorKind::DuplicateRequest,
                "An approval request for this share has already been sent",
            )),
            Entry::Vacant(slot) => {
                slot.insert(request.id);
                self.requests.insert(request.id, request.clone());
                Ok(request.clone())
            }
        }
    }

    async fn update(&self, request: &ApprovalRequest) -> AppResult<ApprovalRequest> {
        let mut entry = self
            .requests
            .get_mut(&request.id)
            .ok_or_else(|| AppError::not_found(format!("Approval {} not found", request.id)))?;
        if entry.share_id != request.share_id || entry.requester_id != request.requester_id {
            return Err(AppError::validation(
                "Approval share and requester cannot be changed",
            ));
        }
        *entry = request.clone();
        Ok(request.clone())
    }

    async fn delete(&self, id: &ApprovalId) -> AppResult<bool> {
        match self.requests.remove(id) {
            Some((_, request)) => {
                self.by_pair
                    .remove(&(request.share_id, request.requester_id));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.requests.len() as u64)
    }
}

#[async_trait]
impl ApprovalRepository for MemoryApprovalRepository {
    async fn find_by_pair(
        &self,
        share_id: &ShareId,
        requester: &IdentityId,
    ) -> AppResult<Option<ApprovalRequest>> {
        let key = (*share_id, requester.clone());
        let Some(id) = self.by_pair.get(&key).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(&id).await
    }

    async fn find_by_owner(&self, owner: &IdentityId) -> AppResult<Vec<ApprovalRequest>> {
        Ok(self.collect_sorted(|r| &r.owner_id == owner))
    }

    async fn find_by_requester(&self, requester: &IdentityId) -> AppResult<Vec<ApprovalRequest>> {
        Ok(self.collect_sorted(|r| &r.requester_id == requester))
    }

    async fn delete_by_share(&self, share_id: &ShareId) -> AppResult<u64> {
        let ids: Vec<ApprovalId> = self
            .requests
            .iter()
            .filter(|entry| &entry.share_id == share_id)
            .map(|entry| *entry.key())
            .collect();

        let mut removed = 0;
        for id in ids {
            if self.delete(&id).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn find_reviewed_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<ApprovalRequest>> {
        Ok(self.collect_sorted(|r| {
            r.status.is_reviewed() && r.reviewed_at.is_some_and(|at| at < cutoff)
        }))
    }
}
