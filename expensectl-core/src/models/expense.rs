//! Expense record and its validated building blocks

use serde::Serialize;
use sqlx::FromRow;

use super::date::canonical_now;
use super::ValidationError;

/// Expense row as stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: i64,
    pub date: String,
}

/// Validated description (trimmed, never empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Trim and validate a description.
    ///
    /// # Example
    /// ```
    /// use expensectl_core::models::Description;
    ///
    /// assert_eq!(Description::new("  Dinner ").unwrap().as_str(), "Dinner");
    /// assert!(Description::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "description",
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Non-negative amount in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(i64);

impl Amount {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::Negative {
                field: "amount",
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Parse a base-10 integer argument.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let value = s.trim().parse::<i64>().map_err(|_| ValidationError::NotAnInteger {
            field: "amount",
            value: s.to_owned(),
            expected: "non-negative",
        })?;
        Self::new(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Positive expense identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpenseId(i64);

impl ExpenseId {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NotPositive {
                field: "id",
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Parse a base-10 integer argument.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let value = s.trim().parse::<i64>().map_err(|_| ValidationError::NotAnInteger {
            field: "id",
            value: s.to_owned(),
            expected: "positive",
        })?;
        Self::new(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// An expense that has not been stored yet (no id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub description: Description,
    pub amount: Amount,
    pub date: String,
}

impl NewExpense {
    /// New expense dated now.
    pub fn new(description: Description, amount: Amount) -> Self {
        Self {
            description,
            amount,
            date: canonical_now(),
        }
    }

    /// Override the date (expects canonical text, see [`super::normalize_date`]).
    pub fn with_date(mut self, date: String) -> Self {
        self.date = date;
        self
    }
}

/// Partial update: one optional slot per mutable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub date: Option<String>,
}

impl ExpensePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// True when no slot is present at all.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.date.is_none()
    }
}
