//! Share-link settings management.

pub mod service;

pub use service::{CreateShareRequest, ShareService};
