//! Expense commands for the expensectl CLI
//!
//! Every command goes through the same three steps:
//! 1. `validate` turns raw arguments into an [`Action`] (no store access)
//! 2. [`run_session`] executes the action against the repository
//! 3. the repository is closed exactly once, whatever the outcome

pub mod add;
pub mod delete;
pub mod list;
pub mod summary;
pub mod update;

use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use expensectl_core::{
    ExpenseError, ExpenseId, ExpensePatch, ExpenseRepo, NewExpense, QueryRunner, SummaryPeriod,
};
use tracing::warn;

#[derive(Subcommand, Debug)]
pub enum ExpenseCommand {
    /// Add an expense
    Add(add::AddArgs),
    /// Delete an expense
    Delete(delete::DeleteArgs),
    /// View all expenses
    List(list::ListArgs),
    /// Update the amount (and optionally description or date) of an expense
    Update(update::UpdateArgs),
    /// Show total expenses, optionally for a year or a month
    Summary(summary::SummaryArgs),
}

/// A validated command, ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(NewExpense),
    Delete(ExpenseId),
    List { json: bool },
    Update { id: ExpenseId, patch: ExpensePatch },
    Summary(SummaryPeriod),
}

impl ExpenseCommand {
    /// Validate arguments. `current_year` fills in a month given without a year.
    pub fn validate(self, current_year: i32) -> Result<Action, ExpenseError> {
        match self {
            Self::Add(args) => args.validate().map(Action::Add),
            Self::Delete(args) => args.validate().map(Action::Delete),
            Self::List(args) => Ok(Action::List { json: args.json }),
            Self::Update(args) => {
                let (id, patch) = args.validate()?;
                Ok(Action::Update { id, patch })
            }
            Self::Summary(args) => args.validate(current_year).map(Action::Summary),
        }
    }
}

/// Run one action, then release the repository.
///
/// The repository is consumed here so there is exactly one release point
/// for the success path, the error path and everything in between.
pub async fn run_session<R, W>(repo: ExpenseRepo<R>, action: Action, out: &mut W) -> Result<()>
where
    R: QueryRunner,
    W: Write,
{
    let outcome = execute(&repo, action, out).await;
    let released = repo.close().await;
    settle(outcome, released)
}

async fn execute<R, W>(repo: &ExpenseRepo<R>, action: Action, out: &mut W) -> Result<()>
where
    R: QueryRunner,
    W: Write,
{
    match action {
        Action::Add(expense) => add::run(repo, expense, out).await,
        Action::Delete(id) => delete::run(repo, id, out).await,
        Action::List { json } => list::run(repo, json, out).await,
        Action::Update { id, patch } => update::run(repo, id, patch, out).await,
        Action::Summary(period) => summary::run(repo, period, out).await,
    }
}

/// Combine the command result with the release result.
///
/// A release failure never hides the command's own error.
fn settle(outcome: Result<()>, released: Result<(), ExpenseError>) -> Result<()> {
    match (outcome, released) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(close_err)) => Err(close_err.into()),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            warn!(error = %close_err, "failed to release database connection");
            Err(err)
        }
    }
}
