//! Approval state machine for gated shares.

pub mod service;

pub use service::{ApprovalService, Decision, DecisionOutcome};
