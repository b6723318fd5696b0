//! Database layer - connection pool, query runner and expense repository
//!
//! # Design Principles
//!
//! - One pool, one connection, owned by the repository for its lifetime
//! - Every operation is a single parameterized statement
//! - Store errors pass through unchanged, no retries

pub mod pool;
pub mod repo;
pub mod runner;

pub use pool::create_pool;
pub use repo::ExpenseRepo;
pub use runner::{MockRunner, Param, PgRunner, QueryRunner, RecordedQuery};
