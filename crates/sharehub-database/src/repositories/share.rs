//! Shared resource repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use sharehub_core::error::{AppError, ErrorKind};
use sharehub_core::result::AppResult;
use sharehub_core::traits::Repository;
use sharehub_core::types::{FileId, IdentityId, ShareId};
use sharehub_entity::share::SharedResource;

/// Share-specific queries on top of the generic CRUD operations.
#[async_trait]
pub trait ShareRepository: Repository<SharedResource, ShareId> + std::fmt::Debug {
    /// Find a share by its public token.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<SharedResource>>;

    /// Find the share attached to a file, if any.
    async fn find_by_file(&self, file_id: &FileId) -> AppResult<Option<SharedResource>>;

    /// List shares created by an owner, newest first.
    async fn find_by_owner(&self, owner: &IdentityId) -> AppResult<Vec<SharedResource>>;

    /// List every share that carries an expiration instant.
    async fn find_with_expiry(&self) -> AppResult<Vec<SharedResource>>;

    /// Add one to the download counter and return the new value.
    async fn increment_download_count(&self, id: &ShareId) -> AppResult<i64>;
}

/// In-memory share store with token and file uniqueness indexes.
#[derive(Debug, Default)]
pub struct MemoryShareRepository {
    shares: DashMap<ShareId, SharedResource>,
    by_token: DashMap<String, ShareId>,
    by_file: DashMap<FileId, ShareId>,
}

impl MemoryShareRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<SharedResource, ShareId> for MemoryShareRepository {
    async fn find_by_id(&self, id: &ShareId) -> AppResult<Option<SharedResource>> {
        Ok(self.shares.get(id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, share: &SharedResource) -> AppResult<SharedResource> {
        match self.by_file.entry(share.file_id) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "File {} already has share settings",
                    share.file_id
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(share.id);
            }
        }

        match self.by_token.entry(share.token.clone()) {
            Entry::Occupied(_) => {
                self.by_file.remove(&share.file_id);
                return Err(AppError::conflict("Share token already in use"));
            }
            Entry::Vacant(slot) => {
                slot.insert(share.id);
            }
        }

        self.shares.insert(share.id, share.clone());
        tracing::debug!(share_id = %share.id, file_id = %share.file_id, "Share stored");
        Ok(share.clone())
    }

    async fn update(&self, share: &SharedResource) -> AppResult<SharedResource> {
        let mut entry = self
            .shares
            .get_mut(&share.id)
            .ok_or_else(|| AppError::not_found(format!("Share {} not found", share.id)))?;
        if entry.token != share.token || entry.file_id != share.file_id {
            return Err(AppError::validation(
                "Share token and file cannot be changed after creation",
            ));
        }
        *entry = share.clone();
        Ok(share.clone())
    }

    async fn delete(&self, id: &ShareId) -> AppResult<bool> {
        match self.shares.remove(id) {
            Some((_, share)) => {
                self.by_token.remove(&share.token);
                self.by_file.remove(&share.file_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.shares.len() as u64)
    }
}

#[async_trait]
impl ShareRepository for MemoryShareRepository {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<SharedResource>> {
        let Some(id) = self.by_token.get(token).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(&id).await
    }

    async fn find_by_file(&self, file_id: &FileId) -> AppResult<Option<SharedResource>> {
        let Some(id) = self.by_file.get(file_id).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(&id).await
    }

    async fn find_by_owner(&self, owner: &IdentityId) -> AppResult<Vec<SharedResource>> {
        let mut shares: Vec<SharedResource> = self
            .shares
            .iter()
            .filter(|entry| &entry.owner_id == owner)
            .map(|entry| entry.value().clone())
            .collect();
        shares.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(shares)
    }

    async fn find_with_expiry(&self) -> AppResult<Vec<SharedResource>> {
        Ok(self
            .shares
            .iter()
            .filter(|entry| entry.expires_at.is_some())
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn increment_download_count(&self, id: &ShareId) -> AppResult<i64> {
        let mut entry = self.shares.get_mut(id).ok_or_else(|| {
            AppError::new(
                ErrorKind::NotFound,
                format!("Share {id} disappeared before its download was recorded"),
            )
        })?;
        entry.download_count += 1;
        Ok(entry.download_count)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use sharehub_entity::share::{StorageAddress, UNLIMITED_DOWNLOADS};

    fn share(token: &str) -> SharedResource {
        SharedResource {
            id: ShareId::new(),
            token: token.to_string(),
            file_id: FileId::new(),
            owner_id: IdentityId::new("owner"),
            storage_address: StorageAddress::new("blob/1"),
            password_digest: None,
            password_salt: None,
            approval_required: false,
            view_only: false,
            max_downloads: UNLIMITED_DOWNLOADS,
            download_count: 0,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_by_token_and_file() {
        let repo = MemoryShareRepository::new();
        let stored = repo.create(&share("abc")).await.unwrap();

        let by_token = repo.find_by_token("abc").await.unwrap().unwrap();
        assert_eq!(by_token.id, stored.id);
        let by_file = repo.find_by_file(&stored.file_id).await.unwrap().unwrap();
        assert_eq!(by_file.id, stored.id);
        assert!(repo.find_by_token("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_one_share_per_file() {
        let repo = MemoryShareRepository::new();
        let first = share("a");
        repo.create(&first).await.unwrap();

        let mut second = share("b");
        second.file_id = first.file_id;
        let err = repo.create(&second).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(repo.find_by_token("b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_clears_indexes() {
        let repo = MemoryShareRepository::new();
        let stored = repo.create(&share("gone")).await.unwrap();
        assert!(repo.delete(&stored.id).await.unwrap());
        assert!(repo.find_by_token("gone").await.unwrap().is_none());
        assert!(repo.find_by_file(&stored.file_id).await.unwrap().is_none());
        assert!(!repo.delete(&stored.id).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(MemoryShareRepository::new());
        let stored = repo.create(&share("hot")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let repo = Arc::clone(&repo);
            let id = stored.id;
            handles.push(tokio::spawn(async move {
                repo.increment_download_count(&id).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let after = repo.find_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(after.download_count, 50);
    }
}
