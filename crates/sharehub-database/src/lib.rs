//! # sharehub-database
//!
//! Repository traits for the three persisted record kinds (shared resources,
//! approval requests, quota accounts) and concurrent in-memory
//! implementations backed by `dashmap`.
//!
//! The engine only ever sees the traits, so a document-store or SQL backend
//! can be dropped in without touching `sharehub-service`.

pub mod repositories;

pub use repositories::{
    ApprovalRepository, MemoryApprovalRepository, MemoryQuotaRepository, MemoryShareRepository,
    QuotaRepository, ShareRepository,
};
