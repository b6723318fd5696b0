//! Table name validation
//!
//! The table name is the one identifier spliced into SQL text rather than
//! bound as a parameter, so it is restricted to a plain lowercase identifier.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Table used when `EXPENSE_TABLE` is not set
pub const DEFAULT_TABLE_NAME: &str = "expensetable";

/// Matches an unquoted Postgres identifier (63 bytes max)
static IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z_][a-z0-9_]{0,62}$").expect("invalid identifier regex")
});

/// Validated table name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Create a table name, validating identifier format.
    ///
    /// # Example
    /// ```
    /// use expensectl_core::models::TableName;
    ///
    /// assert!(TableName::new("expensetable").is_ok());
    /// assert!(TableName::new("expenses; DROP TABLE x").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "table name" });
        }

        if !IDENT_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "table name",
                reason: "must be a lowercase identifier of letters, digits and underscores",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(DEFAULT_TABLE_NAME.to_owned())
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
