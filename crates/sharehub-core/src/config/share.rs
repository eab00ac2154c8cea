//! Share-link configuration.

use serde::{Deserialize, Serialize};

/// Settings applied when share links are created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Expiry applied when the owner sets none, or when the plan does not
    /// allow a custom one.
    #[serde(default = "default_expiry_days")]
    pub default_expiry_days: i64,
    /// Number of random bytes in a share token (hex doubles the length).
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            default_expiry_days: default_expiry_days(),
            token_bytes: default_token_bytes(),
        }
    }
}

fn default_expiry_days() -> i64 {
    7
}

fn default_token_bytes() -> usize {
    16
}
