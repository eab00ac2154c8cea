//! Quota account lifecycle, team membership and plan changes.

use std::sync::Arc;

use tracing::info;

use sharehub_core::error::AppError;
use sharehub_core::traits::Repository;
use sharehub_core::types::{IdentityId, PrincipalKind};
use sharehub_database::repositories::QuotaRepository;
use sharehub_entity::identity::AuthenticatedIdentity;
use sharehub_entity::quota::{PrincipalRef, QuotaAccount};

use super::plan::PlanCatalog;

/// Opens quota accounts and manages team rosters and plans.
#[derive(Debug, Clone)]
pub struct AccountService {
    quota_repo: Arc<dyn QuotaRepository>,
    catalog: Arc<PlanCatalog>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(quota_repo: Arc<dyn QuotaRepository>, catalog: Arc<PlanCatalog>) -> Self {
        Self {
            quota_repo,
            catalog,
        }
    }

    /// Opens an empty account on `plan`. The plan must exist for the
    /// principal's kind. A team account is founded by `founder`, who becomes
    /// its owner, first admin and only member; an individual account ignores it.
    pub async fn open_account(
        &self,
        principal: PrincipalRef,
        plan: &str,
        founder: Option<IdentityId>,
    ) -> Result<QuotaAccount, AppError> {
        self.catalog.resolve(principal.kind, plan)?;

        let account = match (principal.kind, founder) {
            (PrincipalKind::Team, Some(founder)) => {
                QuotaAccount::founded_by(principal, plan, founder)
            }
            _ => QuotaAccount::new(principal, plan),
        };

        let account = self.quota_repo.create(&account).await?;
        info!(principal = %account.principal, plan = %account.plan, "Quota account opened");
        Ok(account)
    }

    /// Adds `member` to a team account on behalf of a team admin, honouring
    /// the plan's member cap. Adding an existing member is a no-op.
    pub async fn add_member(
        &self,
        team: &PrincipalRef,
        actor: &AuthenticatedIdentity,
        member: IdentityId,
    ) -> Result<QuotaAccount, AppError> {
        require_team(team)?;
        let account = self.load(team).await?;
        require_manager(&account, actor)?;

        let plan = self.catalog.resolve(team.kind, &account.plan)?;
        let cap = usize::try_from(plan.limits.max_members).ok();

        let account = self.quota_repo.insert_member(team, &member, cap).await?;
        info!(team = %team, member = %member, actor = %actor.id, "Team member added");
        Ok(account)
    }

    /// Removes `member` from a team account on behalf of a team admin. The
    /// owner cannot be removed.
    pub async fn remove_member(
        &self,
        team: &PrincipalRef,
        actor: &AuthenticatedIdentity,
        member: &IdentityId,
    ) -> Result<(), AppError> {
        require_team(team)?;
        let account = self.load(team).await?;
        require_manager(&account, actor)?;

        if account.is_owned_by(member) {
            return Err(AppError::validation(format!(
                "{member} owns {team} and cannot be removed"
            )));
        }
        if !self.quota_repo.remove_member(team, member).await? {
            return Err(AppError::not_found(format!("{member} is not a member of {team}")));
        }

        info!(team = %team, member = %member, actor = %actor.id, "Team member removed");
        Ok(())
    }

    /// Moves an account onto another plan tier. Only the owner (or a
    /// platform admin) may do so. Usage is left as is, so a downgrade below
    /// current usage refuses every further upload until space is released.
    pub async fn change_plan(
        &self,
        principal: &PrincipalRef,
        actor: &AuthenticatedIdentity,
        plan: &str,
    ) -> Result<QuotaAccount, AppError> {
        let account = self.load(principal).await?;
        if !actor.is_admin() && !account.is_owned_by(&actor.id) {
            return Err(AppError::not_owner(format!(
                "Only the owner of {principal} can change its plan"
            )));
        }

        let resolved = self.catalog.resolve(principal.kind, plan)?;
        let updated = self.quota_repo.set_plan(principal, plan).await?;
        info!(
            principal = %principal,
            from = %account.plan,
            to = %resolved.tier,
            actor = %actor.id,
            "Plan changed"
        );
        Ok(updated)
    }

    async fn load(&self, principal: &PrincipalRef) -> Result<QuotaAccount, AppError> {
        self.quota_repo
            .find_by_id(principal)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Quota account for {principal} not found")))
    }
}

fn require_team(principal: &PrincipalRef) -> Result<(), AppError> {
    if principal.kind != PrincipalKind::Team {
        return Err(AppError::validation(format!(
            "{principal} is not a team account"
        )));
    }
    Ok(())
}

fn require_manager(account: &QuotaAccount, actor: &AuthenticatedIdentity) -> Result<(), AppError> {
    if actor.is_admin() || account.is_managed_by(&actor.id) {
        return Ok(());
    }
    Err(AppError::not_owner(format!(
        "Only the admins of {} can change its members",
        account.principal
    )))
}
