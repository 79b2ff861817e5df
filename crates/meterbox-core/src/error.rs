//! Shared error type across meterbox crates.

use thiserror::Error;

/// Stable error codes (used by startup code and tests to classify failures).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Empty or malformed metric name.
    InvalidName,
    /// Name already taken by a family of any kind.
    DuplicateName,
    /// Malformed, duplicated or reserved label names.
    InvalidLabels,
    /// Empty, non-finite or unsorted histogram bounds.
    InvalidBuckets,
    /// Config file could not be parsed or failed validation.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal failure (I/O).
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::InvalidLabels => "INVALID_LABELS",
            ErrorCode::InvalidBuckets => "INVALID_BUCKETS",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MeterboxError>;

/// Configuration-time errors. Registration and config loading return these;
/// callers are expected to abort startup.
#[derive(Debug, Error)]
pub enum MeterboxError {
    #[error("invalid metric name: {0:?}")]
    InvalidName(String),
    #[error("metric already registered: {0}")]
    DuplicateName(String),
    #[error("invalid label names: {0}")]
    InvalidLabels(String),
    #[error("invalid bucket bounds: {0}")]
    InvalidBuckets(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
    #[error("internal: {0}")]
    Internal(String),
}

impl MeterboxError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MeterboxError::InvalidName(_) => ErrorCode::InvalidName,
            MeterboxError::DuplicateName(_) => ErrorCode::DuplicateName,
            MeterboxError::InvalidLabels(_) => ErrorCode::InvalidLabels,
            MeterboxError::InvalidBuckets(_) => ErrorCode::InvalidBuckets,
            MeterboxError::BadConfig(_) => ErrorCode::BadConfig,
            MeterboxError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
            MeterboxError::Internal(_) => ErrorCode::Internal,
        }
    }
}

/// Usage errors on the recording path. Never returned to callers; the
/// registry logs them and drops the observation.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RecordError {
    #[error("label value count mismatch (expected {expected}, got {got})")]
    Arity { expected: usize, got: usize },
    #[error("missing label: {0}")]
    MissingLabel(String),
    #[error("unexpected label: {0}")]
    UnexpectedLabel(String),
}
