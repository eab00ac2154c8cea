//! # sharehub-service
//!
//! Access-gating and resource-accounting engine for ShareHub. Each service
//! orchestrates repositories and the password gate to decide whether a share
//! may be viewed or downloaded and whether an upload fits a plan.
//!
//! Services follow constructor injection. Dependencies are provided at
//! construction time via `Arc` references, and every call takes the acting
//! identity as an explicit parameter.

pub mod access;
pub mod approval;
pub mod download;
pub mod expiry;
pub mod quota;
pub mod share;
pub mod state;

pub use access::{AccessAction, AccessEngine, AccessGrant, Credentials};
pub use approval::{ApprovalService, Decision, DecisionOutcome};
pub use download::DownloadCounter;
pub use expiry::ExpiryEvaluator;
pub use quota::{AccountService, PlanCatalog, QuotaCalculator, ResolvedPlan, UploadReceipt, UploadService};
pub use share::{CreateShareRequest, ShareService};
pub use state::EngineState;
