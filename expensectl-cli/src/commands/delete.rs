//! `delete` - remove an expense by id

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use expensectl_core::{ExpenseError, ExpenseId, ExpenseRepo, QueryRunner};
use tracing::info;

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Delete the expense with the given id
    #[arg(long, allow_negative_numbers = true)]
    pub id: String,
}

impl DeleteArgs {
    pub fn validate(self) -> Result<ExpenseId, ExpenseError> {
        Ok(ExpenseId::parse(&self.id)?)
    }
}

pub async fn run<R: QueryRunner, W: Write>(
    repo: &ExpenseRepo<R>,
    id: ExpenseId,
    out: &mut W,
) -> Result<()> {
    repo.delete(id.get()).await?;
    info!(id = id.get(), "expense deleted");
    writeln!(out, "Expense deleted successfully (ID: {})", id.get())?;
    Ok(())
}
