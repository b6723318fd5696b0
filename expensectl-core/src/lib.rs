//! expensectl-core: expense records backed by a single Postgres table
//!
//! Provides the validated domain model, the repository that owns the
//! connection pool, and the summary aggregation used by the CLI.

pub mod db;
pub mod error;
pub mod models;
pub mod summary;

pub use db::{ExpenseRepo, MockRunner, Param, PgRunner, QueryRunner};
pub use error::{ExpenseError, Result};
pub use models::{
    Amount, Description, Expense, ExpenseId, ExpensePatch, NewExpense, TableName,
    ValidationError,
};
pub use summary::{summarize, SummaryPeriod};
