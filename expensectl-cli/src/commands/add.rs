//! `add` - record a new expense

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use expensectl_core::models::normalize_date;
use expensectl_core::{Amount, Description, ExpenseError, ExpenseRepo, NewExpense, QueryRunner};
use tracing::info;

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Expense description
    #[arg(long, allow_hyphen_values = true)]
    pub description: String,

    /// Amount that is spent for the expense (whole units)
    #[arg(long, allow_negative_numbers = true)]
    pub amount: String,

    /// When the expense happened: YYYY-MM-DD or RFC 3339 (default: now)
    #[arg(long)]
    pub date: Option<String>,
}

impl AddArgs {
    pub fn validate(self) -> Result<NewExpense, ExpenseError> {
        let description = Description::new(&self.description)?;
        let amount = Amount::parse(&self.amount)?;
        let expense = NewExpense::new(description, amount);

        match self.date {
            Some(date) => Ok(expense.with_date(normalize_date(&date)?)),
            None => Ok(expense),
        }
    }
}

pub async fn run<R: QueryRunner, W: Write>(
    repo: &ExpenseRepo<R>,
    expense: NewExpense,
    out: &mut W,
) -> Result<()> {
    let stored = repo.insert(&expense).await?;
    info!(id = stored.id, amount = stored.amount, "expense added");
    writeln!(out, "Expense added successfully (ID: {})", stored.id)?;
    Ok(())
}
