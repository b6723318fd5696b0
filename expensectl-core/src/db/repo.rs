//! Expense repository
//!
//! Owns the query runner (and through it the pool) for its whole lifetime.
//! Each operation is exactly one statement:
//! - insert: INSERT ... RETURNING *
//! - delete: DELETE ... RETURNING *, zero rows means not found
//! - update: UPDATE with only the patched columns, id bound as $1
//! - find_all: plain SELECT, store order

use tracing::debug;

use super::pool::create_pool;
use super::runner::{Param, PgRunner, QueryRunner};
use crate::error::{ExpenseError, Result};
use crate::models::{Amount, Expense, ExpenseId, ExpensePatch, NewExpense, TableName, ValidationError};

/// Expense repository
pub struct ExpenseRepo<R = PgRunner> {
    runner: R,
    table: TableName,
}

impl ExpenseRepo<PgRunner> {
    /// Open a pool against `database_url` and wrap it.
    pub async fn connect(database_url: &str, table: TableName) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        debug!(%table, "connected to expense store");
        Ok(Self::new(PgRunner::new(pool), table))
    }
}

impl<R: QueryRunner> ExpenseRepo<R> {
    pub fn new(runner: R, table: TableName) -> Self {
        Self { runner, table }
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Store a new expense, returning it with its generated id.
    pub async fn insert(&self, expense: &NewExpense) -> Result<Expense> {
        let sql = insert_statement(&self.table);
        let params = [
            Param::from(expense.description.as_str()),
            Param::Int(expense.amount.get()),
            Param::from(expense.date.as_str()),
        ];

        self.fetch(&sql, &params)
            .await?
            .into_iter()
            .next()
            .ok_or(ExpenseError::NotFound("Expense could not be added."))
    }

    /// Delete by id. Returns `true` when a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let id = ExpenseId::new(id).map_err(|_| ValidationError::InvalidId { action: "deleted" })?;

        let sql = delete_statement(&self.table);
        let deleted = self.fetch(&sql, &[Param::Int(id.get())]).await?;
        if deleted.is_empty() {
            return Err(ExpenseError::NotFound("Expense could not be deleted."));
        }
        Ok(true)
    }

    /// Apply a partial update and return the updated row.
    pub async fn update(&self, id: i64, patch: &ExpensePatch) -> Result<Expense> {
        let id = ExpenseId::new(id).map_err(|_| ValidationError::InvalidId { action: "updated" })?;
        let (sql, params) = update_statement(&self.table, id, patch)?;

        self.fetch(&sql, &params)
            .await?
            .into_iter()
            .next()
            .ok_or(ExpenseError::NotFound("Expense could not be updated."))
    }

    /// Every stored expense, in whatever order the store returns them.
    pub async fn find_all(&self) -> Result<Vec<Expense>> {
        let sql = select_all_statement(&self.table);
        self.fetch(&sql, &[]).await
    }

    /// Release the pool. Consumes the repository so it can only happen once.
    pub async fn close(self) -> Result<()> {
        debug!(table = %self.table, "closing expense store");
        self.runner.close().await?;
        Ok(())
    }

    async fn fetch(&self, sql: &str, params: &[Param]) -> Result<Vec<Expense>> {
        debug!(sql, params = params.len(), "running statement");
        let rows = self.runner.fetch_expenses(sql, params).await?;
        debug!(rows = rows.len(), "statement returned");
        Ok(rows)
    }
}

fn insert_statement(table: &TableName) -> String {
    format!("INSERT INTO {table} (description, amount, date) VALUES ($1, $2, $3) RETURNING *;")
}

fn delete_statement(table: &TableName) -> String {
    format!("DELETE FROM {table} WHERE id=$1 RETURNING *;")
}

fn select_all_statement(table: &TableName) -> String {
    format!("SELECT id, description, amount, date FROM {table};")
}

/// Build the UPDATE for the present patch slots.
///
/// `id` is always `$1`; changed columns follow as `$2..` in the fixed order
/// description, amount, date. Blank description/date slots are skipped.
fn update_statement(
    table: &TableName,
    id: ExpenseId,
    patch: &ExpensePatch,
) -> std::result::Result<(String, Vec<Param>), ValidationError> {
    if patch.is_empty() {
        return Err(ValidationError::NoFieldsToUpdate);
    }

    let mut columns: Vec<(&str, Param)> = Vec::with_capacity(3);

    if let Some(description) = patch.description.as_deref().map(str::trim) {
        if !description.is_empty() {
            columns.push(("description", Param::from(description)));
        }
    }

    if let Some(amount) = patch.amount {
        columns.push(("amount", Param::Int(Amount::new(amount)?.get())));
    }

    if let Some(date) = patch.date.as_deref().map(str::trim) {
        if !date.is_empty() {
            columns.push(("date", Param::from(date)));
        }
    }

    if columns.is_empty() {
        return Err(ValidationError::NoFieldsToUpdate);
    }

    let mut params = Vec::with_capacity(columns.len() + 1);
    params.push(Param::Int(id.get()));

    let mut assignments = Vec::with_capacity(columns.len());
    for (column, value) in columns {
        params.push(value);
        assignments.push(format!("{column}=${}", params.len()));
    }

    let sql = format!(
        "UPDATE {table} SET {} WHERE id=$1 RETURNING *;",
        assignments.join(", ")
    );
    Ok((sql, params))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::MockRunner;
    use crate::models::Description;

    fn repo() -> (ExpenseRepo<Arc<MockRunner>>, Arc<MockRunner>) {
        let mock = Arc::new(MockRunner::new());
        (ExpenseRepo::new(Arc::clone(&mock), TableName::default()), mock)
    }

    fn stored(id: i64, amount: i64) -> Expense {
        Expense {
            id,
            description: "Dinner".into(),
            amount,
            date: "2024-01-05T12:00:00.000Z".into(),
        }
    }

    fn db_error() -> sqlx::Error {
        sqlx::Error::Protocol("Database Error".into())
    }

    fn dinner() -> NewExpense {
        NewExpense::new(Description::new("Dinner").unwrap(), Amount::new(100).unwrap())
            .with_date("2024-01-05T12:00:00.000Z".into())
    }

    // insert

    #[tokio::test]
    async fn insert_returns_stored_expense() {
        let (repo, mock) = repo();
        mock.push_rows(vec![stored(1, 100)]);

        let expense = repo.insert(&dinner()).await.unwrap();

        assert_eq!(expense, stored(1, 100));
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].sql,
            "INSERT INTO expensetable (description, amount, date) VALUES ($1, $2, $3) RETURNING *;"
        );
        assert_eq!(
            calls[0].params,
            vec![
                Param::from("Dinner"),
                Param::Int(100),
                Param::from("2024-01-05T12:00:00.000Z"),
            ]
        );
    }

    #[tokio::test]
    async fn insert_propagates_store_error() {
        let (repo, mock) = repo();
        mock.push_error(db_error());

        let err = repo.insert(&dinner()).await.unwrap_err();

        assert!(err.is_storage());
        assert!(err.to_string().contains("Database Error"));
        assert_eq!(mock.call_count(), 1);
    }

    // delete

    #[tokio::test]
    async fn delete_rejects_non_positive_id_without_query() {
        let (repo, mock) = repo();

        for id in [0, -1, i64::MIN] {
            let err = repo.delete(id).await.unwrap_err();
            assert!(err.is_invalid_argument());
            assert_eq!(
                err.to_string(),
                "Invalid argument: Expense could not be deleted. Please provide valid expense ID."
            );
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn delete_missing_expense_is_not_found() {
        let (repo, mock) = repo();
        mock.push_rows(vec![]);

        let err = repo.delete(1).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Expense could not be deleted.");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn delete_propagates_store_error() {
        let (repo, mock) = repo();
        mock.push_error(db_error());

        let err = repo.delete(1).await.unwrap_err();

        assert!(err.is_storage());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn delete_returns_true() {
        let (repo, mock) = repo();
        mock.push_rows(vec![stored(1, 10)]);

        assert!(repo.delete(1).await.unwrap());

        let calls = mock.calls();
        assert_eq!(calls[0].sql, "DELETE FROM expensetable WHERE id=$1 RETURNING *;");
        assert_eq!(calls[0].params, vec![Param::Int(1)]);
    }

    // update

    #[tokio::test]
    async fn update_rejects_non_positive_id_without_query() {
        let (repo, mock) = repo();

        let err = repo.update(-1, &ExpensePatch::new()).await.unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "Invalid argument: Expense could not be updated. Please provide valid expense ID."
        );

        let err = repo.update(0, &ExpensePatch::new().amount(5)).await.unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn update_requires_a_field() {
        let (repo, mock) = repo();

        let err = repo.update(1, &ExpensePatch::new()).await.unwrap_err();

        assert!(err.is_invalid_argument());
        assert!(err
            .to_string()
            .contains("Please provide the value of the field you want to update."));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn update_with_only_blank_fields_is_rejected() {
        let (repo, mock) = repo();
        let patch = ExpensePatch::new().description("   ").date("");

        let err = repo.update(1, &patch).await.unwrap_err();

        assert!(matches!(
            err,
            ExpenseError::InvalidArgument(ValidationError::NoFieldsToUpdate)
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn update_rejects_negative_amount() {
        let (repo, mock) = repo();

        let err = repo.update(1, &ExpensePatch::new().amount(-5)).await.unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn update_propagates_store_error() {
        let (repo, mock) = repo();
        mock.push_error(db_error());

        let err = repo.update(1, &ExpensePatch::new().amount(12)).await.unwrap_err();

        assert!(err.is_storage());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn update_missing_expense_is_not_found() {
        let (repo, mock) = repo();
        mock.push_rows(vec![]);

        let err = repo.update(1, &ExpensePatch::new().amount(1)).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Expense could not be updated.");
    }

    #[tokio::test]
    async fn update_amount_only() {
        let (repo, mock) = repo();
        mock.push_rows(vec![stored(1, 100)]);

        let updated = repo.update(1, &ExpensePatch::new().amount(100)).await.unwrap();

        assert_eq!(updated, stored(1, 100));
        let calls = mock.calls();
        assert_eq!(calls[0].sql, "UPDATE expensetable SET amount=$2 WHERE id=$1 RETURNING *;");
        assert_eq!(calls[0].params, vec![Param::Int(1), Param::Int(100)]);
    }

    #[tokio::test]
    async fn update_amount_zero_is_included() {
        let (repo, mock) = repo();
        mock.push_rows(vec![stored(3, 0)]);

        repo.update(3, &ExpensePatch::new().amount(0)).await.unwrap();

        assert_eq!(mock.calls()[0].params, vec![Param::Int(3), Param::Int(0)]);
    }

    #[tokio::test]
    async fn update_description_only_is_trimmed() {
        let (repo, mock) = repo();
        mock.push_rows(vec![stored(1, 100)]);

        repo.update(1, &ExpensePatch::new().description("  Dinner ")).await.unwrap();

        let calls = mock.calls();
        assert_eq!(
            calls[0].sql,
            "UPDATE expensetable SET description=$2 WHERE id=$1 RETURNING *;"
        );
        assert_eq!(calls[0].params, vec![Param::Int(1), Param::from("Dinner")]);
    }

    #[tokio::test]
    async fn update_date_only() {
        let (repo, mock) = repo();
        mock.push_rows(vec![stored(1, 100)]);
        let date = "2024-02-01T08:00:00.000Z";

        repo.update(1, &ExpensePatch::new().date(date)).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].sql, "UPDATE expensetable SET date=$2 WHERE id=$1 RETURNING *;");
        assert_eq!(calls[0].params, vec![Param::Int(1), Param::from(date)]);
    }

    #[tokio::test]
    async fn update_all_fields_in_canonical_order() {
        let (repo, mock) = repo();
        mock.push_rows(vec![stored(9, 5)]);
        let patch = ExpensePatch::new()
            .date("2024-02-01T08:00:00.000Z")
            .amount(5)
            .description("Taxi");

        repo.update(9, &patch).await.unwrap();

        let calls = mock.calls();
        assert_eq!(
            calls[0].sql,
            "UPDATE expensetable SET description=$2, amount=$3, date=$4 WHERE id=$1 RETURNING *;"
        );
        assert_eq!(
            calls[0].params,
            vec![
                Param::Int(9),
                Param::from("Taxi"),
                Param::Int(5),
                Param::from("2024-02-01T08:00:00.000Z"),
            ]
        );
    }

    #[tokio::test]
    async fn update_skips_blank_description_but_keeps_amount() {
        let (repo, mock) = repo();
        mock.push_rows(vec![stored(2, 7)]);

        repo.update(2, &ExpensePatch::new().description(" ").amount(7))
            .await
            .unwrap();

        assert_eq!(
            mock.calls()[0].sql,
            "UPDATE expensetable SET amount=$2 WHERE id=$1 RETURNING *;"
        );
    }

    // find_all

    #[tokio::test]
    async fn find_all_propagates_store_error() {
        let (repo, mock) = repo();
        mock.push_error(db_error());

        let err = repo.find_all().await.unwrap_err();

        assert!(err.is_storage());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn find_all_returns_expenses() {
        let (repo, mock) = repo();
        mock.push_rows(vec![]);
        mock.push_rows(vec![stored(1, 10), stored(2, 20)]);

        assert!(repo.find_all().await.unwrap().is_empty());
        assert_eq!(
            repo.find_all().await.unwrap(),
            vec![stored(1, 10), stored(2, 20)]
        );
        assert_eq!(
            mock.calls()[0].sql,
            "SELECT id, description, amount, date FROM expensetable;"
        );
    }

    // close

    #[tokio::test]
    async fn close_releases_runner_once() {
        let (repo, mock) = repo();

        repo.close().await.unwrap();

        assert_eq!(mock.close_count(), 1);
    }

    #[tokio::test]
    async fn close_surfaces_failure() {
        let (repo, mock) = repo();
        mock.fail_close(sqlx::Error::PoolClosed);

        let err = repo.close().await.unwrap_err();

        assert!(err.is_storage());
        assert_eq!(mock.close_count(), 1);
    }

    #[test]
    fn statements_use_configured_table() {
        let table = TableName::new("household").unwrap();
        assert_eq!(
            select_all_statement(&table),
            "SELECT id, description, amount, date FROM household;"
        );
        assert_eq!(
            delete_statement(&table),
            "DELETE FROM household WHERE id=$1 RETURNING *;"
        );
    }
}
