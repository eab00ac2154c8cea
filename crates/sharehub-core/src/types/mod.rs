//! Shared value types used across crates.

pub mod id;
pub mod plan;

pub use id::{ApprovalId, FileId, IdentityId, ShareId};
pub use plan::{PlanTier, PrincipalKind};
