//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("tree store not found: {0}")]
    StoreNotFound(PathBuf),

    #[error("no tree store path given")]
    NoStorePath,

    #[error("input ended unexpectedly")]
    EndOfInput,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<std::io::Error> for ApplicationError {
    /// Console I/O: end of input is a distinct, fatal condition.
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::EndOfInput
        } else {
            Self::OperationFailed {
                context: "console i/o".to_string(),
                source: Box::new(e),
            }
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
