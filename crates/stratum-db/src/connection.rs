//! The driver seam.
//!
//! The engine only ever talks to a database through [`Connection`] and
//! [`PreparedStatement`]. Statement handles own their SQL text, bindings and
//! buffered results; they never borrow the connection, so one handle can be
//! executed repeatedly with `conn.execute(&mut statement)`.

use std::collections::VecDeque;

use async_trait::async_trait;
use stratum_core::{Error, ParamKind, Result, SqlValue};

/// A decoded result row.
pub type Row = Vec<SqlValue>;

/// An open database connection.
#[async_trait]
pub trait Connection: Send {
    /// Handle returned by [`Connection::prepare`].
    type Statement: PreparedStatement + Send;

    /// Prepares `sql` without executing it.
    async fn prepare(&mut self, sql: &str) -> Result<Self::Statement>;

    /// Executes a prepared statement with its current bindings, replacing
    /// any previously buffered result.
    async fn execute(&mut self, statement: &mut Self::Statement) -> Result<()>;

    /// Returns the id generated by the most recent insert on this
    /// connection. `column` names the sequence on drivers that need one.
    async fn last_insert_id(&mut self, column: Option<&str>) -> Result<SqlValue>;
}

/// A prepared statement and the result of its last execution.
pub trait PreparedStatement {
    /// Binds `value` to the 1-based placeholder `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `position` is zero.
    fn bind(&mut self, position: usize, value: SqlValue, kind: ParamKind) -> Result<()>;

    /// Forgets every binding.
    fn clear_bindings(&mut self);

    /// Rows affected by the last execution. For a query returning rows this
    /// is the number of rows returned.
    fn row_count(&self) -> u64;

    /// Takes every remaining row.
    fn fetch_all(&mut self) -> Vec<Row>;

    /// Takes the next row.
    fn fetch_one(&mut self) -> Option<Row>;

    /// Takes the next row and returns its cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the row has no column `index`.
    fn fetch_column(&mut self, index: usize) -> Result<Option<SqlValue>>;
}

/// Statement handle that buffers the whole result of each execution.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferedStatement {
    sql: String,
    returns_rows: bool,
    bindings: Vec<Option<(SqlValue, ParamKind)>>,
    rows: VecDeque<Row>,
    affected: u64,
}

impl BufferedStatement {
    /// Creates a handle for `sql`. `returns_rows` decides whether execution
    /// collects rows or an affected-row count.
    #[must_use]
    pub fn new(sql: impl Into<String>, returns_rows: bool) -> Self {
        Self {
            sql: sql.into(),
            returns_rows,
            bindings: Vec::new(),
            rows: VecDeque::new(),
            affected: 0,
        }
    }

    /// The prepared SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Whether the statement produces a result set.
    #[must_use]
    pub const fn returns_rows(&self) -> bool {
        self.returns_rows
    }

    /// Current bindings in placeholder order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a position below the highest
    /// bound one was skipped.
    pub fn bindings(&self) -> Result<Vec<(SqlValue, ParamKind)>> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(i, binding)| {
                binding.clone().ok_or_else(|| {
                    Error::invalid_argument("position", format!("parameter {} is not bound", i + 1))
                })
            })
            .collect()
    }

    /// Stores a result set. The affected count becomes the row count.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.affected = rows.len() as u64;
        self.rows = rows.into();
    }

    /// Stores an affected-row count and clears any buffered rows.
    pub fn set_affected(&mut self, affected: u64) {
        self.affected = affected;
        self.rows.clear();
    }
}

impl PreparedStatement for BufferedStatement {
    fn bind(&mut self, position: usize, value: SqlValue, kind: ParamKind) -> Result<()> {
        if position == 0 {
            return Err(Error::invalid_argument("position", "positions start at 1"));
        }
        if self.bindings.len() < position {
            self.bindings.resize(position, None);
        }
        self.bindings[position - 1] = Some((value, kind));
        Ok(())
    }

    fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    fn row_count(&self) -> u64 {
        self.affected
    }

    fn fetch_all(&mut self) -> Vec<Row> {
        self.rows.drain(..).collect()
    }

    fn fetch_one(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    fn fetch_column(&mut self, index: usize) -> Result<Option<SqlValue>> {
        let Some(mut row) = self.rows.pop_front() else {
            return Ok(None);
        };
        if index >= row.len() {
            return Err(Error::invalid_argument(
                "column_index",
                format!("row has {} columns, asked for index {index}", row.len()),
            ));
        }
        Ok(Some(row.swap_remove(index)))
    }
}
