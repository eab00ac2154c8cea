//! Access decisions for share-link traffic.

pub mod engine;

pub use engine::{AccessAction, AccessEngine, AccessGrant, Credentials};
