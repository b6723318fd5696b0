//! Expense totals over a calendar period
//!
//! A linear scan: parse each stored date in local time, keep the ones
//! inside the period, add up their amounts.

use std::fmt;

use chrono::{DateTime, Datelike, Local, Month};
use tracing::warn;

use crate::models::{parse_stored, Expense};

/// Period a summary covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPeriod {
    All,
    Year(i32),
    Month { year: i32, month: Month },
}

impl SummaryPeriod {
    /// Build a period from optional CLI filters.
    ///
    /// A month without a year means that month of `current_year`.
    pub fn from_filters(month: Option<Month>, year: Option<i32>, current_year: i32) -> Self {
        match (month, year) {
            (None, None) => Self::All,
            (None, Some(year)) => Self::Year(year),
            (Some(month), year) => Self::Month {
                year: year.unwrap_or(current_year),
                month,
            },
        }
    }

    /// Whether a local timestamp falls inside the period.
    pub fn contains(&self, date: &DateTime<Local>) -> bool {
        match self {
            Self::All => true,
            Self::Year(year) => date.year() == *year,
            Self::Month { year, month } => {
                // Month is 1-based at the interface; compare 0-based.
                date.year() == *year && date.month0() == month.number_from_month() - 1
            }
        }
    }
}

impl fmt::Display for SummaryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "Total expenses"),
            Self::Year(year) => write!(f, "Total expenses for {}", year),
            Self::Month { year, month } => {
                write!(f, "Total expenses for {} of {}", month.name(), year)
            }
        }
    }
}

/// Sum of `amount` over expenses dated inside `period`.
///
/// Rows whose date can't be read are skipped, except for [`SummaryPeriod::All`]
/// which needs no date at all.
///
/// Amounts are `i64`, so the total is widened to `i128`: a slice can never
/// hold enough rows to overflow it.
pub fn summarize(expenses: &[Expense], period: SummaryPeriod) -> i128 {
    expenses
        .iter()
        .filter(|expense| {
            if period == SummaryPeriod::All {
                return true;
            }
            match parse_stored(&expense.date) {
                Some(date) => period.contains(&date),
                None => {
                    warn!(id = expense.id, date = %expense.date, "skipping expense with unreadable date");
                    false
                }
            }
        })
        .map(|expense| i128::from(expense.amount))
        .sum()
}
