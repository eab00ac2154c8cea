//! Approval request entities.

pub mod model;
pub mod status;

pub use model::ApprovalRequest;
pub use status::ApprovalStatus;
