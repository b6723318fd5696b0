//! `update` - change an existing expense

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use expensectl_core::models::normalize_date;
use expensectl_core::{
    Amount, Description, ExpenseError, ExpenseId, ExpensePatch, ExpenseRepo, QueryRunner,
};
use tracing::info;

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Expense id
    #[arg(long, allow_negative_numbers = true)]
    pub id: String,

    /// Amount that is spent for the expense (whole units)
    #[arg(long, allow_negative_numbers = true)]
    pub amount: String,

    /// New description
    #[arg(long, allow_hyphen_values = true)]
    pub description: Option<String>,

    /// New date: YYYY-MM-DD or RFC 3339
    #[arg(long)]
    pub date: Option<String>,
}

impl UpdateArgs {
    pub fn validate(self) -> Result<(ExpenseId, ExpensePatch), ExpenseError> {
        let id = ExpenseId::parse(&self.id)?;
        let mut patch = ExpensePatch::new().amount(Amount::parse(&self.amount)?.get());

        if let Some(description) = self.description {
            patch = patch.description(Description::new(&description)?.as_str());
        }
        if let Some(date) = self.date {
            patch = patch.date(normalize_date(&date)?);
        }

        Ok((id, patch))
    }
}

pub async fn run<R: QueryRunner, W: Write>(
    repo: &ExpenseRepo<R>,
    id: ExpenseId,
    patch: ExpensePatch,
    out: &mut W,
) -> Result<()> {
    let updated = repo.update(id.get(), &patch).await?;
    info!(id = updated.id, amount = updated.amount, "expense updated");
    writeln!(
        out,
        "Expense updated successfully (ID: {}, amount: ${})",
        updated.id, updated.amount
    )?;
    Ok(())
}
