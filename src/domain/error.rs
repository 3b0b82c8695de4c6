//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree and store contracts.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid tree state: {0}")]
    InvalidState(String),

    #[error("malformed store at line {line}: {reason}")]
    MalformedStore { line: usize, reason: String },

    #[error("content spans several lines and cannot be stored: {0:?}")]
    MultilineContent(String),

    #[error("expected 'yes' or 'no', got {0:?}")]
    BadResponse(String),
}

impl DomainError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedStore {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
