//! Share link token generation.

pub mod token;

pub use token::LinkTokenGenerator;
