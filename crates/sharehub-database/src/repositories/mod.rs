//! Repository traits and in-memory implementations.

pub mod approval;
pub mod quota;
pub mod share;

pub use approval::{ApprovalRepository, MemoryApprovalRepository};
pub use quota::{MemoryQuotaRepository, QuotaRepository};
pub use share::{MemoryShareRepository, ShareRepository};
