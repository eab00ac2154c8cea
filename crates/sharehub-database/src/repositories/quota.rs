//! Quota account repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use sharehub_core::error::AppError;
use sharehub_core::result::AppResult;
use sharehub_core::traits::Repository;
use sharehub_core::types::IdentityId;
use sharehub_entity::quota::{PrincipalRef, QuotaAccount};

/// Quota-specific operations on top of the generic CRUD operations.
///
/// Only `commit_usage` writes `used_bytes`. The roster and plan writes below
/// change their own field in place, so they never undo a concurrent commit.
#[async_trait]
pub trait QuotaRepository: Repository<QuotaAccount, PrincipalRef> + std::fmt::Debug {
    /// Persist a new cumulative usage only if the stored value still equals
    /// `expected`. A mismatch means another upload committed in between and
    /// fails with `Conflict`.
    async fn commit_usage(
        &self,
        principal: &PrincipalRef,
        expected: u64,
        new_used: u64,
    ) -> AppResult<()>;

    /// Add `member` to the roster. A member already present is left as is.
    /// With a `cap`, a roster already holding `cap` members fails with
    /// `QuotaExceeded`.
    async fn insert_member(
        &self,
        principal: &PrincipalRef,
        member: &IdentityId,
        cap: Option<usize>,
    ) -> AppResult<QuotaAccount>;

    /// Drop `member` from the roster and from the admins. Returns whether
    /// it was a member.
    async fn remove_member(&self, principal: &PrincipalRef, member: &IdentityId)
    -> AppResult<bool>;

    /// Replace the plan tag.
    async fn set_plan(&self, principal: &PrincipalRef, plan: &str) -> AppResult<QuotaAccount>;
}

/// In-memory quota account store.
#[derive(Debug, Default)]
pub struct MemoryQuotaRepository {
    accounts: DashMap<PrincipalRef, QuotaAccount>,
}

impl MemoryQuotaRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn missing(principal: &PrincipalRef) -> AppError {
        AppError::not_found(format!("Quota account for {principal} not found"))
    }
}

#[async_trait]
impl Repository<QuotaAccount, PrincipalRef> for MemoryQuotaRepository {
    async fn find_by_id(&self, principal: &PrincipalRef) -> AppResult<Option<QuotaAccount>> {
        Ok(self.accounts.get(principal).map(|entry| entry.value().clone()))
    }

    async fn create(&self, account: &QuotaAccount) -> AppResult<QuotaAccount> {
        match self.accounts.entry(account.principal.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Quota account for {} already exists",
                account.principal
            ))),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(account.clone())
            }
        }
    }

    async fn update(&self, account: &QuotaAccount) -> AppResult<QuotaAccount> {
        let mut entry = self.accounts.get_mut(&account.principal).ok_or_else(|| {
            AppError::not_found(format!("Quota account for {} not found", account.principal))
        })?;
        *entry = account.clone();
        Ok(account.clone())
    }

    async fn delete(&self, principal: &PrincipalRef) -> AppResult<bool> {
        Ok(self.accounts.remove(principal).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.accounts.len() as u64)
    }
}

#[async_trait]
impl QuotaRepository for MemoryQuotaRepository {
    async fn commit_usage(
        &self,
        principal: &PrincipalRef,
        expected: u64,
        new_used: u64,
    ) -> AppResult<()> {
        let mut entry = self.accounts.get_mut(principal).ok_or_else(|| {
            AppError::not_found(format!("Quota account for {principal} not found"))
        })?;
        if entry.used_bytes != expected {
            return Err(AppError::conflict(format!(
                "Storage usage for {principal} changed during upload ({expected} -> {})",
                entry.used_bytes
            )));
        }
        entry.used_bytes = new_used;
        Ok(())
    }

    async fn insert_member(
        &self,
        principal: &PrincipalRef,
        member: &IdentityId,
        cap: Option<usize>,
    ) -> AppResult<QuotaAccount> {
        let mut entry = self
            .accounts
            .get_mut(principal)
            .ok_or_else(|| Self::missing(principal))?;
        if entry.members.contains(member) {
            return Ok(entry.clone());
        }
        if let Some(cap) = cap.filter(|cap| entry.members.len() >= *cap) {
            return Err(AppError::quota_exceeded(format!(
                "{principal} already has {} of {cap} members allowed on the {} plan",
                entry.members.len(),
                entry.plan
            )));
        }
        entry.members.push(member.clone());
        Ok(entry.clone())
    }

    async fn remove_member(
        &self,
        principal: &PrincipalRef,
        member: &IdentityId,
    ) -> AppResult<bool> {
        let mut entry = self
            .accounts
            .get_mut(principal)
            .ok_or_else(|| Self::missing(principal))?;
        let before = entry.members.len();
        entry.members.retain(|m| m != member);
        entry.admins.retain(|a| a != member);
        Ok(entry.members.len() != before)
    }

    async fn set_plan(&self, principal: &PrincipalRef, plan: &str) -> AppResult<QuotaAccount> {
        let mut entry = self
            .accounts
            .get_mut(principal)
            .ok_or_else(|| Self::missing(principal))?;
        entry.plan = plan.to_string();
        Ok(entry.clone())
    }
}
