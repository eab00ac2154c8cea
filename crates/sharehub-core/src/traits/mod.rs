//! Core traits defined in `sharehub-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
