//! Shared resource entities.

pub mod model;

pub use model::{SharedResource, StorageAddress, UNLIMITED_DOWNLOADS};
