//! Structured error types for expensectl-core.
//!
//! The repository never wraps or retries store failures: a `sqlx::Error`
//! travels to the caller untouched inside [`ExpenseError::Storage`].

use thiserror::Error;

use crate::models::ValidationError;

/// Main error type for expense operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Bad or missing input, rejected before the store is touched
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The targeted row does not exist
    #[error("{0}")]
    NotFound(&'static str),

    /// The store call itself failed (connectivity, constraint violation, ...)
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Result type alias for expense operations
pub type Result<T> = std::result::Result<T, ExpenseError>;

impl ExpenseError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
