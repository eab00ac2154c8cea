//! Plan catalog built from configuration.

use std::collections::HashMap;

use sharehub_core::config::{PlanLimits, PlansConfig};
use sharehub_core::error::AppError;
use sharehub_core::types::{PlanTier, PrincipalKind};

/// A plan tag resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPlan {
    /// Principal kind the tier was resolved for.
    pub kind: PrincipalKind,
    /// The tier.
    pub tier: PlanTier,
    /// Its limits.
    pub limits: PlanLimits,
}

/// Lookup table `(principal kind, tier) -> limits`.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    tiers: HashMap<(PrincipalKind, PlanTier), PlanLimits>,
}

impl PlanCatalog {
    /// Builds the catalog from the `plans` configuration section.
    pub fn new(config: &PlansConfig) -> Self {
        let individual = config
            .individual
            .iter()
            .map(|(tier, limits)| ((PrincipalKind::Individual, *tier), *limits));
        let team = config
            .team
            .iter()
            .map(|(tier, limits)| ((PrincipalKind::Team, *tier), *limits));

        Self {
            tiers: individual.chain(team).collect(),
        }
    }

    /// Resolves a raw plan tag for a principal kind.
    ///
    /// An empty tag, an unknown tag, or a tier not offered to `kind` all fail
    /// with `PlanMissing`; there is no zero-quota fallback.
    pub fn resolve(&self, kind: PrincipalKind, tag: &str) -> Result<ResolvedPlan, AppError> {
        let tier: PlanTier = tag.parse()?;
        let limits = self.tiers.get(&(kind, tier)).copied().ok_or_else(|| {
            AppError::plan_missing(format!("invalid plan: '{tier}' is not offered to {kind} accounts"))
        })?;
        Ok(ResolvedPlan { kind, tier, limits })
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::new(&PlansConfig::default())
    }
}
