//! Statement execution.
//!
//! Free functions over any [`Connection`]: prepare, bind every parameter by
//! position, execute, then reduce the result to the shape the caller asked
//! for. The engine holds no state of its own.

use stratum_core::{Error, Result, SqlValue};
use tracing::debug;

use crate::connection::{Connection, PreparedStatement, Row};

/// Parameters for one execution of a statement run by [`multi_execute`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamRow(Vec<SqlValue>);

impl ParamRow {
    /// The values, in placeholder order.
    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.0
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the row binds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<SqlValue>> for ParamRow {
    fn from(values: Vec<SqlValue>) -> Self {
        Self(values)
    }
}

/// A bare value is a one-parameter row.
impl From<SqlValue> for ParamRow {
    fn from(value: SqlValue) -> Self {
        Self(vec![value])
    }
}

fn require_sql(sql: &str) -> Result<()> {
    if sql.trim().is_empty() {
        return Err(Error::invalid_argument("sql", "must not be empty"));
    }
    Ok(())
}

fn bind_all<S: PreparedStatement>(statement: &mut S, params: &[SqlValue]) -> Result<()> {
    for (i, value) in params.iter().enumerate() {
        statement.bind(i + 1, value.clone(), value.kind())?;
    }
    Ok(())
}

/// Prepares and executes `sql` with `params`, returning the statement
/// handle so the caller can read rows or the affected count.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for empty SQL and [`Error::Driver`]
/// when the driver rejects the statement.
pub async fn execute<C: Connection>(
    conn: &mut C,
    sql: &str,
    params: &[SqlValue],
) -> Result<C::Statement> {
    require_sql(sql)?;
    debug!(sql = %sql, params = params.len(), "Executing SQL");

    let mut statement = conn.prepare(sql).await?;
    bind_all(&mut statement, params)?;
    conn.execute(&mut statement).await?;
    Ok(statement)
}

/// Executes a query and returns every row.
///
/// # Errors
///
/// See [`execute`].
pub async fn execute_collection_reader<C: Connection>(
    conn: &mut C,
    sql: &str,
    params: &[SqlValue],
) -> Result<Vec<Row>> {
    let mut statement = execute(conn, sql, params).await?;
    Ok(statement.fetch_all())
}

/// Executes a query and returns its first row, if any.
///
/// # Errors
///
/// See [`execute`].
pub async fn execute_row_reader<C: Connection>(
    conn: &mut C,
    sql: &str,
    params: &[SqlValue],
) -> Result<Option<Row>> {
    let mut statement = execute(conn, sql, params).await?;
    Ok(statement.fetch_one())
}

/// Executes a query and returns cell `column_index` of its first row.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the first row has no such column,
/// plus everything [`execute`] can return.
pub async fn execute_cell_reader<C: Connection>(
    conn: &mut C,
    sql: &str,
    params: &[SqlValue],
    column_index: usize,
) -> Result<Option<SqlValue>> {
    let mut statement = execute(conn, sql, params).await?;
    statement.fetch_column(column_index)
}

/// Executes a statement and returns the affected-row count.
///
/// # Errors
///
/// See [`execute`].
pub async fn execute_non_query<C: Connection>(
    conn: &mut C,
    sql: &str,
    params: &[SqlValue],
) -> Result<u64> {
    let statement = execute(conn, sql, params).await?;
    Ok(affected_rows(&statement))
}

/// Prepares `sql` once and executes it once per row, in order.
///
/// Returns one affected-row count per input row. The first failing row
/// aborts the whole call; earlier executions are not rolled back.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for empty SQL and the first
/// [`Error::Driver`] raised by any row.
pub async fn multi_execute<C: Connection>(
    conn: &mut C,
    sql: &str,
    rows: Vec<ParamRow>,
) -> Result<Vec<u64>> {
    require_sql(sql)?;
    debug!(sql = %sql, rows = rows.len(), "Preparing SQL for multiple executions");

    let mut statement = conn.prepare(sql).await?;
    let mut counts = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        debug!(row = index, params = row.len(), "Executing prepared row");
        statement.clear_bindings();
        bind_all(&mut statement, row.values())?;
        conn.execute(&mut statement).await?;
        counts.push(statement.row_count());
    }
    Ok(counts)
}

/// Rows affected by the last execution of `statement`.
#[must_use]
pub fn affected_rows<S: PreparedStatement>(statement: &S) -> u64 {
    statement.row_count()
}

/// Id generated by the most recent insert on `conn`.
///
/// # Errors
///
/// Returns [`Error::Driver`] if the driver cannot report it.
pub async fn last_insert_id<C: Connection>(conn: &mut C, column: Option<&str>) -> Result<SqlValue> {
    conn.last_insert_id(column).await
}

#[cfg(test)]
mod tests {
    use stratum_core::ParamKind;

    use super::*;
    use crate::testing::{Event, ScriptedConnection};

    fn int(n: i64) -> SqlValue {
        SqlValue::Int(n)
    }

    #[tokio::test]
    async fn test_execute_binds_in_order() {
        let mut conn = ScriptedConnection::new();
        execute(&mut conn, "SELECT ? , ?", &[int(1), SqlValue::Blob(vec![7])])
            .await
            .unwrap();

        assert_eq!(
            conn.events(),
            &[
                Event::Prepare(String::from("SELECT ? , ?")),
                Event::Execute(vec![
                    (int(1), ParamKind::Scalar),
                    (SqlValue::Blob(vec![7]), ParamKind::Binary),
                ]),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_sql_never_reaches_driver() {
        let mut conn = ScriptedConnection::new();
        let err = execute(&mut conn, "  ", &[]).await.unwrap_err();
        assert!(err.is_validation());
        assert!(conn.events().is_empty());
    }

    #[tokio::test]
    async fn test_driver_error_propagates() {
        let mut conn = ScriptedConnection::new().fail_prepare("no such table: t");
        let err = execute(&mut conn, "SELECT * FROM t", &[]).await.unwrap_err();
        assert_eq!(err, Error::Driver(String::from("no such table: t")));
    }

    #[tokio::test]
    async fn test_readers() {
        let rows = vec![vec![int(1), int(10)], vec![int(2), int(20)]];
        let mut conn = ScriptedConnection::new().with_rows(rows.clone());

        assert_eq!(
            execute_collection_reader(&mut conn, "SELECT a, b FROM t", &[])
                .await
                .unwrap(),
            rows
        );
        assert_eq!(
            execute_row_reader(&mut conn, "SELECT a, b FROM t", &[])
                .await
                .unwrap(),
            Some(vec![int(1), int(10)])
        );
        assert_eq!(
            execute_cell_reader(&mut conn, "SELECT a, b FROM t", &[], 1)
                .await
                .unwrap(),
            Some(int(10))
        );
    }

    #[tokio::test]
    async fn test_readers_on_empty_result() {
        let mut conn = ScriptedConnection::new().with_rows(vec![]);
        assert!(execute_row_reader(&mut conn, "SELECT a FROM t", &[])
            .await
            .unwrap()
            .is_none());
        assert!(execute_cell_reader(&mut conn, "SELECT a FROM t", &[], 5)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_cell_reader_out_of_range() {
        let mut conn = ScriptedConnection::new().with_rows(vec![vec![int(1)]]);
        let err = execute_cell_reader(&mut conn, "SELECT a FROM t", &[], 3)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_non_query() {
        let mut conn = ScriptedConnection::new().with_affected(vec![3]);
        assert_eq!(
            execute_non_query(&mut conn, "DELETE FROM t", &[]).await.unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn test_multi_execute_prepares_once() {
        let mut conn = ScriptedConnection::new().with_affected(vec![1, 1]);
        let rows = vec![
            ParamRow::from(vec![int(1), int(2)]),
            ParamRow::from(vec![int(3), int(4)]),
        ];
        let counts = multi_execute(&mut conn, "INSERT INTO t (a, b) VALUES (?, ?)", rows)
            .await
            .unwrap();

        assert_eq!(counts, vec![1, 1]);
        assert_eq!(
            conn.events(),
            &[
                Event::Prepare(String::from("INSERT INTO t (a, b) VALUES (?, ?)")),
                Event::Execute(vec![(int(1), ParamKind::Scalar), (int(2), ParamKind::Scalar)]),
                Event::Execute(vec![(int(3), ParamKind::Scalar), (int(4), ParamKind::Scalar)]),
            ]
        );
    }

    #[tokio::test]
    async fn test_multi_execute_wraps_scalars() {
        let mut conn = ScriptedConnection::new().with_affected(vec![1, 1]);
        let rows = vec![ParamRow::from(int(5)), ParamRow::from(int(6))];
        multi_execute(&mut conn, "DELETE FROM t WHERE id = ?", rows)
            .await
            .unwrap();

        assert_eq!(
            &conn.events()[1..],
            &[
                Event::Execute(vec![(int(5), ParamKind::Scalar)]),
                Event::Execute(vec![(int(6), ParamKind::Scalar)]),
            ]
        );
    }

    #[tokio::test]
    async fn test_multi_execute_aborts_on_failure() {
        let mut conn = ScriptedConnection::new()
            .with_affected(vec![1])
            .fail_execute_at(1, "Duplicate entry '3' for key 'PRIMARY'");
        let rows = vec![
            ParamRow::from(int(1)),
            ParamRow::from(int(3)),
            ParamRow::from(int(4)),
        ];
        let err = multi_execute(&mut conn, "INSERT INTO t (id) VALUES (?)", rows)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            Error::Driver(String::from("Duplicate entry '3' for key 'PRIMARY'"))
        );
        // Prepare plus the two attempted executions; the third row never runs.
        assert_eq!(conn.events().len(), 3);
    }

    #[tokio::test]
    async fn test_last_insert_id() {
        let mut conn = ScriptedConnection::new().with_last_insert_id(int(42));
        assert_eq!(last_insert_id(&mut conn, None).await.unwrap(), int(42));
    }
}
