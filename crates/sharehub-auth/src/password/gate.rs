//! Salted SHA-256 password gate.
//!
//! Digest and salt are always exchanged hex-encoded. Digest = SHA-256 of the
//! secret bytes followed by the raw salt bytes.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use sharehub_core::error::{AppError, ErrorKind};

/// Salt length in bytes.
pub const SALT_LENGTH: usize = 16;

/// A freshly computed digest/salt pair, both hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    /// Hex SHA-256 digest.
    pub digest: String,
    /// Hex salt.
    pub salt: String,
}

/// Verifies share passwords against stored digests.
#[derive(Debug, Clone, Default)]
pub struct PasswordGate;

impl PasswordGate {
    /// Creates a new password gate.
    pub fn new() -> Self {
        Self
    }

    /// Hashes `secret` with a fresh random salt.
    pub fn digest(&self, secret: &str) -> PasswordDigest {
        let salt: [u8; SALT_LENGTH] = rand::random();
        PasswordDigest {
            digest: hex::encode(Self::hash(secret.as_bytes(), &salt)),
            salt: hex::encode(salt),
        }
    }

    /// Checks `presented` against a stored digest and salt.
    ///
    /// An empty stored digest means the share has no password and every
    /// presented secret passes. A missing or wrong secret fails with
    /// `InvalidCredential`; undecodable stored values fail with
    /// `CorruptCredentialRecord`.
    pub fn verify(
        &self,
        stored_digest: &str,
        stored_salt: &str,
        presented: &str,
    ) -> Result<(), AppError> {
        if stored_digest.is_empty() {
            return Ok(());
        }

        let expected = hex::decode(stored_digest)?;
        let salt = hex::decode(stored_salt)?;
        if expected.len() != 32 {
            return Err(AppError::new(
                ErrorKind::CorruptCredentialRecord,
                format!(
                    "Stored password digest has {} bytes, expected 32",
                    expected.len()
                ),
            ));
        }

        if presented.is_empty() {
            return Err(AppError::invalid_credential("Password required"));
        }

        let actual = Self::hash(presented.as_bytes(), &salt);
        if bool::from(actual.as_slice().ct_eq(expected.as_slice())) {
            Ok(())
        } else {
            tracing::debug!("Share password mismatch");
            Err(AppError::invalid_credential("Password incorrect"))
        }
    }

    fn hash(secret: &[u8], salt: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(secret);
        hasher.update(salt);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_digest_accepts_anything() {
        let gate = PasswordGate::new();
        assert!(gate.verify("", "", "").is_ok());
        assert!(gate.verify("", "", "whatever").is_ok());
        assert!(gate.verify("", "not-hex", "x").is_ok());
    }

    #[test]
    fn test_digest_then_verify() {
        let gate = PasswordGate::new();
        let stored = gate.digest("s3cret");
        assert_eq!(stored.salt.len(), SALT_LENGTH * 2);
        assert!(gate.verify(&stored.digest, &stored.salt, "s3cret").is_ok());
    }

    #[test]
    fn test_wrong_password_is_invalid_credential() {
        let gate = PasswordGate::new();
        let stored = gate.digest("s3cret");
        let err = gate
            .verify(&stored.digest, &stored.salt, "guess")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredential);
        assert_eq!(err.message, "Password incorrect");
    }

    #[test]
    fn test_missing_password_is_distinct_message() {
        let gate = PasswordGate::new();
        let stored = gate.digest("s3cret");
        let err = gate.verify(&stored.digest, &stored.salt, "").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredential);
        assert_eq!(err.message, "Password required");
    }

    #[test]
    fn test_salt_participates_in_digest() {
        let salt = [0u8; 1];
        let digest = hex::encode(PasswordGate::hash(b"abc", &salt));
        let gate = PasswordGate::new();
        assert!(gate.verify(&digest, "00", "abc").is_ok());
        assert!(gate.verify(&digest, "01", "abc").is_err());
    }

    #[test]
    fn test_corrupt_record() {
        let gate = PasswordGate::new();
        let err = gate.verify("zz", "00", "abc").unwrap_err();
        assert_eq!(err.kind, ErrorKind::CorruptCredentialRecord);

        let stored = gate.digest("abc");
        let err = gate.verify(&stored.digest, "q", "abc").unwrap_err();
        assert_eq!(err.kind, ErrorKind::CorruptCredentialRecord);

        let err = gate.verify("abcd", "00", "abc").unwrap_err();
        assert_eq!(err.kind, ErrorKind::CorruptCredentialRecord);
    }
}
