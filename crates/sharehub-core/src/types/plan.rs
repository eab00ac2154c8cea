//! Plan tier and principal kind enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Kind of plan-bearing principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    /// A single user account.
    Individual,
    /// A team account shared by its members.
    Team,
}

impl PrincipalKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named storage/feature tier.
///
/// Which tiers exist for which principal kind is decided by the plan
/// configuration, not by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Entry tier.
    Free,
    /// Middle tier (individuals only in the default tables).
    Plus,
    /// Top tier.
    Premium,
}

impl PlanTier {
    /// Return the tier as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Plus => "plus",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(AppError::plan_missing("plan is missing")),
            "free" => Ok(Self::Free),
            "plus" => Ok(Self::Plus),
            "premium" => Ok(Self::Premium),
            other => Err(AppError::plan_missing(format!("invalid plan: '{other}'"))),
        }
    }
}
