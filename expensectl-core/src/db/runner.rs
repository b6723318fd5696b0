//! Query runner trait and implementations
//!
//! The repository talks to the store only through [`QueryRunner`]:
//! - [`PgRunner`] executes against a real `PgPool`
//! - [`MockRunner`] records statements and replays canned rows for tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::Expense;

/// Positional statement parameter (`$1`, `$2`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Text(String),
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_owned())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

/// Executes expense statements against the store (testable)
#[async_trait]
pub trait QueryRunner: Send + Sync {
    /// Run one statement and decode every returned row as an [`Expense`].
    async fn fetch_expenses(&self, sql: &str, params: &[Param])
        -> Result<Vec<Expense>, sqlx::Error>;

    /// Release the underlying connection resources.
    async fn close(&self) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl<T: QueryRunner + ?Sized> QueryRunner for Arc<T> {
    async fn fetch_expenses(
        &self,
        sql: &str,
        params: &[Param],
    ) -> Result<Vec<Expense>, sqlx::Error> {
        (**self).fetch_expenses(sql, params).await
    }

    async fn close(&self) -> Result<(), sqlx::Error> {
        (**self).close().await
    }
}

/// Real runner backed by a sqlx pool
pub struct PgRunner {
    pool: PgPool,
}

impl PgRunner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryRunner for PgRunner {
    async fn fetch_expenses(
        &self,
        sql: &str,
        params: &[Param],
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let mut query = sqlx::query_as::<_, Expense>(sql);
        for param in params {
            query = match param {
                Param::Int(value) => query.bind(*value),
                Param::Text(value) => query.bind(value.clone()),
            };
        }
        query.fetch_all(&self.pool).await
    }

    async fn close(&self) -> Result<(), sqlx::Error> {
        self.pool.close().await;
        Ok(())
    }
}

/// A statement seen by [`MockRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Vec<Param>,
}

/// Mock runner for testing
///
/// Responses are consumed in FIFO order; with none queued, a statement
/// returns zero rows.
#[derive(Default)]
pub struct MockRunner {
    responses: Mutex<VecDeque<Result<Vec<Expense>, sqlx::Error>>>,
    calls: Mutex<Vec<RecordedQuery>>,
    close_error: Mutex<Option<sqlx::Error>>,
    close_calls: AtomicUsize,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows to return from the next statement
    pub fn push_rows(&self, rows: Vec<Expense>) {
        lock(&self.responses).push_back(Ok(rows));
    }

    /// Error to return from the next statement
    pub fn push_error(&self, error: sqlx::Error) {
        lock(&self.responses).push_back(Err(error));
    }

    /// Make the next `close` fail
    pub fn fail_close(&self, error: sqlx::Error) {
        *lock(&self.close_error) = Some(error);
    }

    pub fn calls(&self) -> Vec<RecordedQuery> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn close_count(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryRunner for MockRunner {
    async fn fetch_expenses(
        &self,
        sql: &str,
        params: &[Param],
    ) -> Result<Vec<Expense>, sqlx::Error> {
        lock(&self.calls).push(RecordedQuery {
            sql: sql.to_owned(),
            params: params.to_vec(),
        });
        lock(&self.responses).pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn close(&self) -> Result<(), sqlx::Error> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        match lock(&self.close_error).take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
