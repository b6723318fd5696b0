//! `list` - print every expense

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use expensectl_core::models::parse_stored;
use expensectl_core::{Expense, ExpenseRepo, QueryRunner};

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run<R: QueryRunner, W: Write>(
    repo: &ExpenseRepo<R>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let expenses = repo.find_all().await?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&expenses)?)?;
        return Ok(());
    }

    writeln!(out, "# ID\tDate\tDescription\tAmount")?;
    for expense in &expenses {
        writeln!(out, "{}", format_row(expense))?;
    }
    Ok(())
}

/// One tab-separated line; the date is shown as a local calendar day.
fn format_row(expense: &Expense) -> String {
    let date = parse_stored(&expense.date)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| expense.date.clone());

    format!(
        "# {}\t{}\t{}\t${}",
        expense.id, date, expense.description, expense.amount
    )
}
