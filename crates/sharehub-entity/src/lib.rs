//! # sharehub-entity
//!
//! Domain entity models for ShareHub. Every struct in this crate is either a
//! persisted record (shared resource, approval request, quota account) or a
//! value object passed into the engine (authenticated identity). All derive
//! `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod approval;
pub mod identity;
pub mod quota;
pub mod share;

pub use approval::{ApprovalRequest, ApprovalStatus};
pub use identity::{AuthenticatedIdentity, IdentityRole};
pub use quota::{PrincipalRef, QuotaAccount, QuotaUsage};
pub use share::{SharedResource, StorageAddress, UNLIMITED_DOWNLOADS};
