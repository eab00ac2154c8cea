//! Authenticated identity handed to the engine by the identity layer.

pub mod model;

pub use model::{AuthenticatedIdentity, IdentityRole};
