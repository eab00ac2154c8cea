//! Quota account entity model.

use std::fmt;

use serde::{Deserialize, Serialize};

use sharehub_core::types::{IdentityId, PrincipalKind};

/// Reference to a plan-bearing principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalRef {
    /// Individual or team.
    pub kind: PrincipalKind,
    /// Principal identifier.
    pub id: IdentityId,
}

impl PrincipalRef {
    /// Reference an individual user.
    pub fn individual(id: impl Into<String>) -> Self {
        Self {
            kind: PrincipalKind::Individual,
            id: IdentityId::new(id),
        }
    }

    /// Reference a team.
    pub fn team(id: impl Into<String>) -> Self {
        Self {
            kind: PrincipalKind::Team,
            id: IdentityId::new(id),
        }
    }
}

impl fmt::Display for PrincipalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Storage accounting unit for a user or team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaAccount {
    /// Owning principal.
    pub principal: PrincipalRef,
    /// Raw plan tag as stored for the principal.
    pub plan: String,
    /// Cumulative bytes charged by committed uploads.
    pub used_bytes: u64,
    /// Members allowed to upload into a team account. Empty for individuals.
    #[serde(default)]
    pub members: Vec<IdentityId>,
    /// Team owner, the only identity allowed to change the team's plan.
    #[serde(default)]
    pub owner: Option<IdentityId>,
    /// Team members allowed to manage the roster.
    #[serde(default)]
    pub admins: Vec<IdentityId>,
}

impl QuotaAccount {
    /// Creates an empty account.
    pub fn new(principal: PrincipalRef, plan: impl Into<String>) -> Self {
        Self {
            principal,
            plan: plan.into(),
            used_bytes: 0,
            members: Vec::new(),
            owner: None,
            admins: Vec::new(),
        }
    }

    /// Opens a team account founded by `founder`, who becomes its owner,
    /// first admin and first member.
    pub fn founded_by(
        principal: PrincipalRef,
        plan: impl Into<String>,
        founder: IdentityId,
    ) -> Self {
        let mut account = Self::new(principal, plan);
        account.members.push(founder.clone());
        account.admins.push(founder.clone());
        account.owner = Some(founder);
        account
    }

    /// Returns whether `identity` may charge uploads to this account.
    pub fn admits(&self, identity: &IdentityId) -> bool {
        match self.principal.kind {
            PrincipalKind::Individual => &self.principal.id == identity,
            PrincipalKind::Team => self.members.iter().any(|m| m == identity),
        }
    }

    /// Returns whether `identity` owns this account. An individual owns
    /// its own account.
    pub fn is_owned_by(&self, identity: &IdentityId) -> bool {
        match self.principal.kind {
            PrincipalKind::Individual => &self.principal.id == identity,
            PrincipalKind::Team => self.owner.as_ref() == Some(identity),
        }
    }

    /// Returns whether `identity` may change a team's roster.
    pub fn is_managed_by(&self, identity: &IdentityId) -> bool {
        self.is_owned_by(identity) || self.admins.iter().any(|a| a == identity)
    }
}
