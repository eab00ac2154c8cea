//! Unified application error types for ShareHub.
//!
//! Every component fails with exactly one [`ErrorKind`]. Callers branch on
//! the kind to choose a response status and a user-facing message, so no
//! layer may downgrade a specific kind to a generic one.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested record was not found.
    NotFound,
    /// The acting identity does not own the record it tried to change.
    NotOwner,
    /// An approval status value outside `pending`/`approved`/`rejected`.
    InvalidStatus,
    /// An approval request already exists for the (resource, requester) pair.
    DuplicateRequest,
    /// Access was requested on a resource that is not approval-gated.
    ApprovalNotRequired,
    /// The resource is approval-gated and the requester has not asked yet.
    ApprovalRequired,
    /// The requester's approval request awaits the owner's review.
    ApprovalPending,
    /// The owner rejected the requester's approval request.
    ApprovalRejected,
    /// A stored approval status could not be recognized.
    ApprovalCorrupt,
    /// A presented share password is missing or wrong.
    InvalidCredential,
    /// A stored password digest or salt could not be decoded.
    CorruptCredentialRecord,
    /// The share's download cap has been reached.
    DownloadLimitExceeded,
    /// The share is view-only and the caller asked to download.
    DownloadNotAllowed,
    /// The share's expiration instant has passed.
    ResourceExpired,
    /// An upload does not fit the principal's storage quota.
    QuotaExceeded,
    /// A single file is larger than the plan's per-upload limit.
    FileTooLarge,
    /// The plan tag is empty or not a tier offered to the principal kind.
    PlanMissing,
    /// The principal's plan does not include the requested share feature.
    FeatureNotInPlan,
    /// Input validation failed.
    Validation,
    /// A concurrent modification or uniqueness violation.
    Conflict,
    /// An opaque persistence or I/O failure.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

/// Coarse response class the HTTP layer maps each [`ErrorKind`] onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StatusClass {
    /// 400-class input problem.
    BadRequest,
    /// 401: credentials missing or wrong.
    Unauthorized,
    /// 403: identity known but not allowed.
    Forbidden,
    /// 404.
    NotFound,
    /// 409.
    Conflict,
    /// 410: the resource existed but is permanently unavailable.
    Gone,
    /// 428: the client must satisfy an approval precondition first.
    PreconditionRequired,
    /// The request was understood but refused by a limit; the message carries
    /// the numeric limits.
    RequestRejected,
    /// 500-class.
    Internal,
}

impl ErrorKind {
    /// Returns the screaming-snake-case code used in logs and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::NotOwner => "NOT_OWNER",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::DuplicateRequest => "DUPLICATE_REQUEST",
            Self::ApprovalNotRequired => "APPROVAL_NOT_REQUIRED",
            Self::ApprovalRequired => "APPROVAL_REQUIRED",
            Self::ApprovalPending => "APPROVAL_PENDING",
            Self::ApprovalRejected => "APPROVAL_REJECTED",
            Self::ApprovalCorrupt => "APPROVAL_CORRUPT",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::CorruptCredentialRecord => "CORRUPT_CREDENTIAL_RECORD",
            Self::DownloadLimitExceeded => "DOWNLOAD_LIMIT_EXCEEDED",
            Self::DownloadNotAllowed => "DOWNLOAD_NOT_ALLOWED",
            Self::ResourceExpired => "RESOURCE_EXPIRED",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::FileTooLarge => "FILE_TOO_LARGE",
            Self::PlanMissing => "PLAN_MISSING",
            Self::FeatureNotInPlan => "FEATURE_NOT_IN_PLAN",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::Storage => "STORAGE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
            Self::Internal => "INTERNAL",
        }
    }

    /// Maps the kind onto the response class the HTTP layer should use.
    pub fn status_class(&self) -> StatusClass {
        match self {
            Self::NotFound => StatusClass::NotFound,
            Self::InvalidCredential => StatusClass::Unauthorized,
            Self::NotOwner | Self::FeatureNotInPlan | Self::DownloadNotAllowed => {
                StatusClass::Forbidden
            }
            Self::ApprovalRequired
            | Self::ApprovalPending
            | Self::ApprovalRejected
            | Self::ApprovalCorrupt => StatusClass::PreconditionRequired,
            Self::DownloadLimitExceeded | Self::QuotaExceeded | Self::FileTooLarge => {
                StatusClass::RequestRejected
            }
            Self::ResourceExpired => StatusClass::Gone,
            Self::DuplicateRequest | Self::Conflict => StatusClass::Conflict,
            Self::InvalidStatus
            | Self::ApprovalNotRequired
            | Self::PlanMissing
            | Self::Validation => StatusClass::BadRequest,
            Self::CorruptCredentialRecord
            | Self::Storage
            | Self::Configuration
            | Self::Serialization
            | Self::Internal => StatusClass::Internal,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified application error used throughout ShareHub.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns `true` when the error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a not-owner error.
    pub fn not_owner(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotOwner, message)
    }

    /// Create an invalid-credential error.
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredential, message)
    }

    /// Create a quota-exceeded error.
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::QuotaExceeded, message)
    }

    /// Create a plan-missing error.
    pub fn plan_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PlanMissing, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<hex::FromHexError> for AppError {
    fn from(err: hex::FromHexError) -> Self {
        Self::with_source(
            ErrorKind::CorruptCredentialRecord,
            format!("Stored credential is not valid hex: {err}"),
            err,
        )
    }
}
