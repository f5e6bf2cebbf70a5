//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (validation, conflicts,
/// missing records). Store/backend failures are carried opaquely in `Store`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or a value fell outside its value set.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No record exists for the given id.
    #[error("not found")]
    NotFound,

    /// A uniqueness conflict (two cards sharing one (suit, rank) pair).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other persistence failure, surfaced from the record store.
    #[error("store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
