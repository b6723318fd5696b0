//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod expense;
pub mod date;
pub mod table;

pub use validation::ValidationError;
pub use expense::{Amount, Description, Expense, ExpenseId, ExpensePatch, NewExpense};
pub use date::{canonical_now, normalize_date, parse_month, parse_stored, parse_year};
pub use table::TableName;
