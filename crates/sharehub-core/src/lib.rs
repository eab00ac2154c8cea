//! # sharehub-core
//!
//! Core crate for ShareHub. Contains the unified error system, configuration
//! schemas, typed identifiers, and the generic repository trait.
//!
//! This crate has **no** internal dependencies on other ShareHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
