//! Quota account entities.

pub mod account;
pub mod usage;

pub use account::{PrincipalRef, QuotaAccount};
pub use usage::QuotaUsage;
