//! Shared resource entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sharehub_core::types::{FileId, IdentityId, ShareId};

/// Sentinel `max_downloads` value meaning "no cap".
pub const UNLIMITED_DOWNLOADS: i64 = -1;

/// Opaque handle to where a file's bytes live. Never interpreted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageAddress(pub String);

impl StorageAddress {
    /// Wrap a storage handle.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }
}

impl fmt::Display for StorageAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file made reachable through a short link.
///
/// `download_count <= max_downloads` holds whenever `max_downloads` is not
/// [`UNLIMITED_DOWNLOADS`], up to the overshoot concurrent downloads may cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedResource {
    /// Internal identifier.
    pub id: ShareId,
    /// Public short-link token.
    pub token: String,
    /// The file this share exposes. At most one share exists per file.
    pub file_id: FileId,
    /// Identity that created the share.
    pub owner_id: IdentityId,
    /// Where the file's bytes live.
    pub storage_address: StorageAddress,
    /// Hex-encoded SHA-256 digest of password ‖ salt. Empty or absent means
    /// no password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_digest: Option<String>,
    /// Hex-encoded salt paired with `password_digest`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_salt: Option<String>,
    /// Whether non-owners need an approved request.
    pub approval_required: bool,
    /// Whether non-owners may only view, never download.
    #[serde(default)]
    pub view_only: bool,
    /// Download cap, or [`UNLIMITED_DOWNLOADS`].
    pub max_downloads: i64,
    /// Successful downloads recorded so far.
    pub download_count: i64,
    /// When the share stops being served. `None` means never.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

impl SharedResource {
    /// Returns whether `identity` owns this share.
    pub fn is_owned_by(&self, identity: &IdentityId) -> bool {
        &self.owner_id == identity
    }

    /// Returns whether a password is set.
    pub fn is_password_protected(&self) -> bool {
        self.password_digest
            .as_deref()
            .is_some_and(|digest| !digest.is_empty())
    }
}
