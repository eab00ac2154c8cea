//! Approval status enumeration.
//!
//! Stored values are read leniently: anything outside the three known
//! statuses becomes [`ApprovalStatus::Unrecognized`] so that a bad record is
//! detected at check time instead of falling through. Caller input is parsed
//! strictly with [`FromStr`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sharehub_core::error::{AppError, ErrorKind};

/// Lifecycle state of an approval request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApprovalStatus {
    /// Awaiting the owner's review.
    Pending,
    /// The owner granted access.
    Approved,
    /// The owner denied access.
    Rejected,
    /// A stored value that matches none of the above.
    Unrecognized(String),
}

impl ApprovalStatus {
    /// Return the status as its stored string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Returns whether the owner has reviewed the request.
    pub fn is_reviewed(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ApprovalStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<ApprovalStatus> for String {
    fn from(status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from(s.to_string()) {
            Self::Unrecognized(raw) => Err(AppError::new(
                ErrorKind::InvalidStatus,
                format!("Invalid status '{raw}'. Expected one of: pending, approved, rejected"),
            )),
            status => Ok(status),
        }
    }
}
