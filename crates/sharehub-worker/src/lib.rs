//! Scheduled maintenance tasks for ShareHub.
//!
//! This crate provides:
//! - The expiry sweep that deletes lapsed shares and stale approvals
//! - A cron scheduler that runs the sweep periodically

pub mod jobs;
pub mod scheduler;

pub use jobs::{ExpirySweep, SweepReport};
pub use scheduler::CronScheduler;
