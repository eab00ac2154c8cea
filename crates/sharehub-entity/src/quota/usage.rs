//! Storage usage value object.

use serde::{Deserialize, Serialize};

/// Snapshot of a principal's storage usage against its plan ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaUsage {
    /// Plan ceiling in bytes.
    pub total_bytes: u64,
    /// Bytes charged so far.
    pub used_bytes: u64,
    /// Bytes still available (zero when over the ceiling after a downgrade).
    pub available_bytes: u64,
    /// Usage percentage (0.0 - 100.0, may exceed 100 after a downgrade).
    pub usage_percent: f64,
}

impl QuotaUsage {
    /// Create a usage snapshot from ceiling and used values.
    pub fn new(total_bytes: u64, used_bytes: u64) -> Self {
        let usage_percent = if total_bytes == 0 {
            0.0
        } else {
            (used_bytes as f64 / total_bytes as f64) * 100.0
        };

        Self {
            total_bytes,
            used_bytes,
            available_bytes: total_bytes.saturating_sub(used_bytes),
            usage_percent,
        }
    }

    /// Check if the ceiling is reached.
    pub fn is_exhausted(&self) -> bool {
        self.used_bytes >= self.total_bytes
    }
}
