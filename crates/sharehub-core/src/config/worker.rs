//! Background sweep configuration.

use serde::{Deserialize, Serialize};

/// Settings for the scheduled expiry sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler runs inside the server process.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (seconds first) for the sweep.
    #[serde(default = "default_sweep_cron")]
    pub sweep_cron: String,
    /// Reviewed approval requests older than this are deleted by the sweep.
    #[serde(default = "default_approval_retention")]
    pub approval_retention_days: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            sweep_cron: default_sweep_cron(),
            approval_retention_days: default_approval_retention(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_cron() -> String {
    "0 0 */6 * * *".to_string()
}

fn default_approval_retention() -> i64 {
    30
}
