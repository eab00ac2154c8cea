//! Share password digests and verification.

pub mod gate;

pub use gate::{PasswordDigest, PasswordGate, SALT_LENGTH};
