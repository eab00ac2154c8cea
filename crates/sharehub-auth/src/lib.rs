//! # sharehub-auth
//!
//! Credential primitives for share links.
//!
//! ## Modules
//!
//! - `password`: salted SHA-256 share passwords, hex-encoded at the boundary
//! - `link`: random share-link tokens

pub mod link;
pub mod password;

pub use link::LinkTokenGenerator;
pub use password::{PasswordDigest, PasswordGate};
