//! Storage accounting: plan lookup, quota evaluation, uploads, and accounts.

pub mod account;
pub mod calculator;
pub mod plan;
pub mod upload;

pub use account::AccountService;
pub use calculator::QuotaCalculator;
pub use plan::{PlanCatalog, ResolvedPlan};
pub use upload::{UploadReceipt, UploadService};
