//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use sharehub_core::config::WorkerConfig;
use sharehub_core::error::AppError;

use crate::jobs::ExpirySweep;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Sweep run on every tick
    sweep: Arc<ExpirySweep>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(sweep: Arc<ExpirySweep>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, sweep })
    }

    /// Register all scheduled tasks from the worker configuration
    pub async fn register_default_tasks(&self, config: &WorkerConfig) -> Result<(), AppError> {
        self.register_expiry_sweep(&config.sweep_cron).await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Expiry sweep on `schedule`
    async fn register_expiry_sweep(&self, schedule: &str) -> Result<(), AppError> {
        let sweep = Arc::clone(&self.sweep);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let sweep = Arc::clone(&sweep);
            Box::pin(async move {
                if let Err(e) = sweep.run(Utc::now()).await {
                    tracing::error!("Expiry sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Failed to create expiry_sweep schedule '{}': {}",
                schedule, e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add expiry_sweep schedule: {}", e))
        })?;

        tracing::info!("Registered: expiry_sweep ({})", schedule);
        Ok(())
    }
}
