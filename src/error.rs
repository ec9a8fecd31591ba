//! Error types
//!
//! Only configuration mistakes surface as errors. Storage and parse failures
//! are absorbed into fallbacks before they reach the UI.

use thiserror::Error;

/// Configuration errors in the scoring tables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("unknown level {0} (expected 1..={max})", max = crate::levels::LEVEL_COUNT)]
    UnknownLevel(u32),

    #[error("invalid tier table: {0}")]
    InvalidTierTable(String),
}

/// Failures reported by a persistent key-value backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage access denied")]
    AccessDenied,

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type ScoringResult<T> = Result<T, ScoringError>;
