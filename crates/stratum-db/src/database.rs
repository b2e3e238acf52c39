//! Table-level CRUD facade.

use stratum_core::{Error, QueryBuilder, Result, SelectOptions, SqlValue, Where};

use crate::connection::{Connection, Row};
use crate::engine::{self, ParamRow};

/// A connection paired with the query builder of its dialect.
///
/// Every method renders its filter, builds the statement through the
/// builder and runs it through the engine. Arguments are validated before
/// the connection is touched.
#[derive(Debug)]
pub struct Database<C, B> {
    conn: C,
    builder: B,
}

impl<C: Connection, B: QueryBuilder> Database<C, B> {
    /// Wraps an open connection.
    pub const fn new(conn: C, builder: B) -> Self {
        Self { conn, builder }
    }

    /// The query builder.
    pub const fn builder(&self) -> &B {
        &self.builder
    }

    /// The underlying connection.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// Releases the underlying connection.
    pub fn into_inner(self) -> C {
        self.conn
    }

    /// Inserts `rows`, one execution of a single-row statement per row.
    ///
    /// Returns the affected count of each row, in order. With
    /// `ignore_duplicates`, a row whose key exists reports 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `rows` is empty or a row's width
    /// differs from `columns`, and the first driver error otherwise.
    pub async fn insert(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: Vec<Row>,
        ignore_duplicates: bool,
    ) -> Result<Vec<u64>> {
        check_rows(columns, &rows)?;
        let sql = self.builder.insert(table, columns, 1, ignore_duplicates)?;
        let rows = rows.into_iter().map(ParamRow::from).collect();
        engine::multi_execute(&mut self.conn, &sql, rows).await
    }

    /// Inserts `rows` in one statement, updating every column outside
    /// `ignore_on_update` for rows whose key exists.
    ///
    /// Everything goes into a single statement, so callers with very many
    /// rows must chunk them to stay under the server's packet limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for empty or ragged rows, or when
    /// every column is ignored.
    pub async fn merge(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: Vec<Row>,
        ignore_on_update: &[&str],
    ) -> Result<u64> {
        check_rows(columns, &rows)?;
        let row_count = i64::try_from(rows.len())
            .map_err(|_| Error::invalid_argument("rows", "too many rows"))?;
        let sql = self
            .builder
            .merge(table, columns, row_count, ignore_on_update)?;
        let params: Vec<SqlValue> = rows.into_iter().flatten().collect();
        engine::execute_non_query(&mut self.conn, &sql, &params).await
    }

    /// Number of rows of `table` matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Driver`] if the count is not an integer.
    pub async fn count_rows(&mut self, table: &str, filter: &Where) -> Result<i64> {
        let (where_sql, params) = filter.render(&self.builder)?.into_parts();
        let sql = self.builder.count_rows(table, &where_sql)?;
        let cell = engine::execute_cell_reader(&mut self.conn, &sql, &params, 0).await?;
        cell.as_ref()
            .and_then(SqlValue::as_i64)
            .ok_or_else(|| Error::Driver(format!("COUNT(*) returned {cell:?}")))
    }

    /// Deletes the rows of `table` matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns validation or driver errors.
    pub async fn delete(&mut self, table: &str, filter: &Where) -> Result<u64> {
        let (where_sql, params) = filter.render(&self.builder)?.into_parts();
        let sql = self.builder.delete(table, &where_sql)?;
        engine::execute_non_query(&mut self.conn, &sql, &params).await
    }

    /// Every matching row.
    ///
    /// # Errors
    ///
    /// Returns validation or driver errors.
    pub async fn retrieve_all(
        &mut self,
        columns: &[&str],
        table: &str,
        filter: &Where,
        distinct: bool,
    ) -> Result<Vec<Row>> {
        let (where_sql, params) = filter.render(&self.builder)?.into_parts();
        let options = SelectOptions {
            distinct,
            ..SelectOptions::default()
        };
        let sql = self.builder.select(table, columns, &where_sql, options)?;
        engine::execute_collection_reader(&mut self.conn, &sql, &params).await
    }

    /// The first matching row, if any.
    ///
    /// # Errors
    ///
    /// Returns validation or driver errors.
    pub async fn retrieve_first(
        &mut self,
        columns: &[&str],
        table: &str,
        filter: &Where,
    ) -> Result<Option<Row>> {
        let (where_sql, params) = filter.render(&self.builder)?.into_parts();
        let sql = self
            .builder
            .select(table, columns, &where_sql, SelectOptions::default())?;
        engine::execute_row_reader(&mut self.conn, &sql, &params).await
    }

    /// Up to `count` matching rows, skipping the first `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `start` is negative or `count`
    /// is not positive, before anything is sent.
    pub async fn retrieve_range(
        &mut self,
        columns: &[&str],
        table: &str,
        filter: &Where,
        start: i64,
        count: i64,
    ) -> Result<Vec<Row>> {
        let (where_sql, params) = filter.render(&self.builder)?.into_parts();
        let sql = self
            .builder
            .select_range(table, columns, &where_sql, start, count)?;
        engine::execute_collection_reader(&mut self.conn, &sql, &params).await
    }

    /// Sets columns on the rows matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns validation or driver errors.
    pub async fn update(
        &mut self,
        table: &str,
        assignments: Vec<(&str, SqlValue)>,
        filter: &Where,
    ) -> Result<u64> {
        let (where_sql, where_params) = filter.render(&self.builder)?.into_parts();
        let (columns, mut params): (Vec<&str>, Vec<SqlValue>) = assignments.into_iter().unzip();
        let sql = self.builder.update(table, &columns, &where_sql)?;
        params.extend(where_params);
        engine::execute_non_query(&mut self.conn, &sql, &params).await
    }

    /// Id generated by the most recent insert.
    ///
    /// # Errors
    ///
    /// Returns driver errors.
    pub async fn last_insert_id(&mut self, column: Option<&str>) -> Result<SqlValue> {
        engine::last_insert_id(&mut self.conn, column).await
    }

    /// Runs raw SQL and returns the statement handle.
    ///
    /// # Errors
    ///
    /// See [`engine::execute`].
    pub async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<C::Statement> {
        engine::execute(&mut self.conn, sql, params).await
    }

    /// Runs raw SQL and returns every row.
    ///
    /// # Errors
    ///
    /// See [`engine::execute`].
    pub async fn execute_collection_reader(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        engine::execute_collection_reader(&mut self.conn, sql, params).await
    }

    /// Runs raw SQL and returns the first row.
    ///
    /// # Errors
    ///
    /// See [`engine::execute`].
    pub async fn execute_row_reader(&mut self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>> {
        engine::execute_row_reader(&mut self.conn, sql, params).await
    }

    /// Runs raw SQL and returns one cell of the first row.
    ///
    /// # Errors
    ///
    /// See [`engine::execute_cell_reader`].
    pub async fn execute_cell_reader(
        &mut self,
        sql: &str,
        params: &[SqlValue],
        column_index: usize,
    ) -> Result<Option<SqlValue>> {
        engine::execute_cell_reader(&mut self.conn, sql, params, column_index).await
    }

    /// Runs raw SQL and returns the affected-row count.
    ///
    /// # Errors
    ///
    /// See [`engine::execute`].
    pub async fn execute_non_query(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        engine::execute_non_query(&mut self.conn, sql, params).await
    }

    /// Runs raw SQL once per row.
    ///
    /// # Errors
    ///
    /// See [`engine::multi_execute`].
    pub async fn multi_execute(&mut self, sql: &str, rows: Vec<ParamRow>) -> Result<Vec<u64>> {
        engine::multi_execute(&mut self.conn, sql, rows).await
    }
}

fn check_rows(columns: &[&str], rows: &[Row]) -> Result<()> {
    if rows.is_empty() {
        return Err(Error::invalid_argument("rows", "must contain at least one row"));
    }
    if let Some(index) = rows.iter().position(|row| row.len() != columns.len()) {
        return Err(Error::invalid_argument(
            "rows",
            format!(
                "row {index} has {} values for {} columns",
                rows[index].len(),
                columns.len()
            ),
        ));
    }
    Ok(())
}
