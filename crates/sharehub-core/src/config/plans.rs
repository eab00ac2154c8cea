//! Plan tier configuration.
//!
//! Each principal kind owns a table of tiers. Adding or re-pricing a tier is
//! a configuration change; code only ever looks tiers up.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::plan::PlanTier;

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * MIB;

/// Limits attached to a single plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    /// Total storage ceiling in bytes. Treated as an exact threshold.
    pub storage_bytes: u64,
    /// Largest single file accepted in one upload.
    pub max_upload_bytes: u64,
    /// Days an uploaded file is retained before it expires.
    pub file_retention_days: i64,
    /// Whether share links may use approval gating, download caps,
    /// view-only mode, and custom expiry.
    #[serde(default)]
    pub share_features: bool,
    /// Member cap for team accounts (`-1` = unlimited, ignored for individuals).
    #[serde(default = "default_max_members")]
    pub max_members: i64,
}

/// Tier tables keyed by principal kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlansConfig {
    /// Tiers offered to individual users.
    #[serde(default = "default_individual")]
    pub individual: HashMap<PlanTier, PlanLimits>,
    /// Tiers offered to teams.
    #[serde(default = "default_team")]
    pub team: HashMap<PlanTier, PlanLimits>,
}

impl Default for PlansConfig {
    fn default() -> Self {
        Self {
            individual: default_individual(),
            team: default_team(),
        }
    }
}

fn default_max_members() -> i64 {
    -1
}

fn default_individual() -> HashMap<PlanTier, PlanLimits> {
    HashMap::from([
        (
            PlanTier::Free,
            PlanLimits {
                storage_bytes: 2 * GIB,
                max_upload_bytes: 100 * MIB,
                file_retention_days: 7,
                share_features: false,
                max_members: -1,
            },
        ),
        (
            PlanTier::Plus,
            PlanLimits {
                storage_bytes: 100 * GIB,
                max_upload_bytes: 2000 * MIB,
                file_retention_days: 30,
                share_features: true,
                max_members: -1,
            },
        ),
        (
            PlanTier::Premium,
            PlanLimits {
                storage_bytes: 1024 * GIB,
                max_upload_bytes: 20000 * MIB,
                file_retention_days: 180,
                share_features: true,
                max_members: -1,
            },
        ),
    ])
}

fn default_team() -> HashMap<PlanTier, PlanLimits> {
    HashMap::from([
        (
            PlanTier::Free,
            PlanLimits {
                storage_bytes: 10 * GIB,
                max_upload_bytes: 100 * MIB,
                file_retention_days: 14,
                share_features: false,
                max_members: 5,
            },
        ),
        (
            PlanTier::Premium,
            PlanLimits {
                storage_bytes: 1000 * GIB,
                max_upload_bytes: 2000 * MIB,
                file_retention_days: 120,
                share_features: true,
                max_members: -1,
            },
        ),
    ])
}
