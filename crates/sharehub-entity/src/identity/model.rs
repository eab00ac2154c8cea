//! Authenticated identity value.

use serde::{Deserialize, Serialize};

use sharehub_core::types::IdentityId;

/// Role carried alongside an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityRole {
    /// Regular account holder.
    #[default]
    User,
    /// Operator allowed to act on behalf of resource owners.
    Admin,
}

/// The caller of an engine operation, already authenticated upstream.
///
/// Passed explicitly into every call; the engine never reads identity from
/// ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    /// Identity string issued by the token layer.
    pub id: IdentityId,
    /// Raw plan tag from the token payload. Resolved lazily so that an empty
    /// or unknown tag surfaces as `PlanMissing` at the point of use.
    pub plan: String,
    /// Role of the identity.
    #[serde(default)]
    pub role: IdentityRole,
}

impl AuthenticatedIdentity {
    /// Creates a regular user identity.
    pub fn user(id: impl Into<String>, plan: impl Into<String>) -> Self {
        Self {
            id: IdentityId::new(id),
            plan: plan.into(),
            role: IdentityRole::User,
        }
    }

    /// Creates an admin identity.
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: IdentityId::new(id),
            plan: String::new(),
            role: IdentityRole::Admin,
        }
    }

    /// Returns whether the identity is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, IdentityRole::Admin)
    }
}
