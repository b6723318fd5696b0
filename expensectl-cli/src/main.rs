//! expensectl CLI - personal expense tracker backed by PostgreSQL
//!
//! Commands: add, delete, list, update, summary (plus shell completions).
//! Each run performs one command against one pooled connection and always
//! releases it before exiting.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand, ValueEnum};
use expensectl_core::ExpenseRepo;
use tracing::debug;

mod commands;
mod config;
mod tracing_setup;

use commands::ExpenseCommand;
use config::Config;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "expensectl",
    author,
    version,
    about = "Expense Tracker CLI App to Manage Your Finances"
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommand),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    let result = match cli.command {
        Commands::Expense(command) => run_expense(command).await,
        Commands::Completions(args) => {
            run_completions(args);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run_expense(command: ExpenseCommand) -> Result<()> {
    let config = Config::from_env()?;
    let action = command.validate(Local::now().year())?;

    let repo = ExpenseRepo::connect(&config.database_url, config.table).await?;
    commands::run_session(repo, action, &mut io::stdout()).await
}

fn run_completions(args: CompletionsArgs) {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
