//! Validation error types

use std::fmt;

/// Validation error for domain models and command arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty (after trimming) when it shouldn't be
    Empty { field: &'static str },

    /// Field must parse as an integer >= 0
    Negative { field: &'static str, value: String },

    /// Field must parse as an integer > 0
    NotPositive { field: &'static str, value: String },

    /// Field is not a base-10 integer at all
    NotAnInteger {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Field parsed but falls outside its allowed range
    OutOfRange {
        field: &'static str,
        value: String,
        min: i64,
        max: i64,
    },

    /// String doesn't match required format
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Repository called with an id <= 0
    InvalidId { action: &'static str },

    /// Update requested without any field to change
    NoFieldsToUpdate,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} required", field),
            Self::Negative { field, value } => {
                write!(f, "{} must be non-negative (got '{}')", field, value)
            }
            Self::NotPositive { field, value } => {
                write!(f, "{} must be positive (got '{}')", field, value)
            }
            Self::NotAnInteger {
                field,
                value,
                expected,
            } => write!(f, "{} must be a {} integer (got '{}')", field, expected, value),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "{} must be between {} and {} (got '{}')",
                field, min, max, value
            ),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidId { action } => write!(
                f,
                "Expense could not be {}. Please provide valid expense ID.",
                action
            ),
            Self::NoFieldsToUpdate => {
                write!(f, "Please provide the value of the field you want to update.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
