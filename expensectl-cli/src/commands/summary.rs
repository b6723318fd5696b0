//! `summary` - total spending, optionally per year or month

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use expensectl_core::models::{parse_month, parse_year};
use expensectl_core::{summarize, ExpenseError, ExpenseRepo, QueryRunner, SummaryPeriod};
use tracing::debug;

#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Month to summarize: 1-12 or a name like "jan" (defaults to the current year)
    #[arg(long)]
    pub month: Option<String>,

    /// Year to summarize
    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<String>,
}

impl SummaryArgs {
    pub fn validate(self, current_year: i32) -> Result<SummaryPeriod, ExpenseError> {
        let month = self.month.as_deref().map(parse_month).transpose()?;
        let year = self.year.as_deref().map(parse_year).transpose()?;
        Ok(SummaryPeriod::from_filters(month, year, current_year))
    }
}

pub async fn run<R: QueryRunner, W: Write>(
    repo: &ExpenseRepo<R>,
    period: SummaryPeriod,
    out: &mut W,
) -> Result<()> {
    let expenses = repo.find_all().await?;
    let total = summarize(&expenses, period);
    debug!(?period, scanned = expenses.len(), %total, "summary computed");
    writeln!(out, "{}: ${}", period, total)?;
    Ok(())
}
