//! Runtime configuration from the process environment
//!
//! `.env` files are read first (current directory, then `~/.expensectl/.env`).
//! dotenvy never overwrites variables that are already set.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use expensectl_core::TableName;
use tracing::debug;

/// Connection string variable
pub const DB_URL_VAR: &str = "DB_URL";
/// Accepted when `DB_URL` is absent
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Optional table override
pub const TABLE_VAR: &str = "EXPENSE_TABLE";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub table: TableName,
}

impl Config {
    /// Load `.env` files, then read the environment.
    pub fn from_env() -> Result<Self> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = present(DB_URL_VAR)
            .or_else(|| present(DATABASE_URL_VAR))
            .ok_or_else(|| anyhow!("Could not connect to database: {DB_URL_VAR} is not set"))?;

        let table = match present(TABLE_VAR) {
            Some(name) => TableName::new(name.trim())
                .map_err(|err| anyhow!("Invalid {TABLE_VAR}: {err}"))?,
            None => TableName::default(),
        };

        Ok(Self {
            database_url,
            table,
        })
    }
}

/// Get the expensectl config directory path (~/.expensectl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".expensectl"))
}

fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => debug!("Loaded .env from {}", env_file.display()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }
}
