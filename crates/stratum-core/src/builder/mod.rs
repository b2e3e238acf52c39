//! Statement templates.
//!
//! [`QueryBuilder`] turns table-level intents into parameterized SQL text.
//! The shared templates are provided methods; a dialect supplies only the
//! handful of fragments that genuinely differ between databases (the
//! insert-ignore keyword, the upsert clause, the limit clause).
//!
//! Every operation validates its arguments before producing any text, and no
//! operation ever embeds a value: each value slot is a placeholder.

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::filter::{CompareOp, WhereFragment};
use crate::validate;
use crate::value::SqlValue;

/// Literal used by the identity filter. Top-level templates elide a WHERE
/// clause whose text is exactly this.
pub const ALWAYS_TRUE: &str = "TRUE";

/// Options for [`QueryBuilder::select`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Render as a subquery: single-space separators, no terminator.
    pub inner: bool,
    /// Emit `SELECT DISTINCT`.
    pub distinct: bool,
}

impl SelectOptions {
    /// Options for a subquery embedded in a WHERE clause.
    #[must_use]
    pub const fn inner() -> Self {
        Self {
            inner: true,
            distinct: false,
        }
    }

    /// Options for a top-level `SELECT DISTINCT`.
    #[must_use]
    pub const fn distinct() -> Self {
        Self {
            inner: false,
            distinct: true,
        }
    }
}

/// Dialect-aware statement builder.
pub trait QueryBuilder: Dialect {
    /// Leading keywords of an insert that skips duplicate-key rows.
    fn insert_ignore_keyword(&self) -> &'static str;

    /// Clause appended to an insert so that duplicate keys update
    /// `update_columns` with the values that were about to be inserted.
    ///
    /// `update_columns` is never empty. The clause must add no placeholders.
    fn upsert_clause(&self, update_columns: &[&str]) -> String;

    /// Clause restricting a select to `count` rows starting at `offset`.
    fn limit_clause(&self, offset: i64, count: i64) -> String;

    /// Query returning the id generated by the last insert on a connection.
    fn last_insert_id_sql(&self) -> &'static str;

    /// Most placeholders the server accepts in one statement. Multi-row
    /// inserts and merges above it are rejected before any SQL is built.
    fn max_placeholders(&self) -> usize {
        65_535
    }

    /// Surrounds a condition in parentheses.
    fn wrap(&self, condition: &str) -> String {
        format!("({condition})")
    }

    /// Dialect override for rendering a single comparison.
    ///
    /// Returning `None` falls back to `(column op ?)`. The default turns
    /// equality with NULL into `IS NULL` and inequality into `IS NOT NULL`,
    /// since arithmetic comparison with NULL is never true.
    fn format_comparison(
        &self,
        column: &str,
        op: CompareOp,
        value: &SqlValue,
    ) -> Option<WhereFragment> {
        if !value.is_null() {
            return None;
        }
        let test = match op {
            CompareOp::Eq => "IS NULL",
            CompareOp::Ne => "IS NOT NULL",
            _ => return None,
        };
        let condition = format!("{} {test}", self.quote_identifier(column));
        Some(WhereFragment::new(self.wrap(&condition), Vec::new()))
    }

    /// Counts the rows of `table` matching `where_sql`.
    fn count_rows(&self, table: &str, where_sql: &str) -> Result<String> {
        validate::table(table)?;
        validate::where_sql(where_sql)?;

        let mut sql = format!(
            "SELECT COUNT(*){}FROM {}",
            self.clause_separator(),
            self.quote_identifier(table)
        );
        self.push_where(&mut sql, where_sql, self.clause_separator());
        sql.push_str(self.statement_terminator());
        Ok(sql)
    }

    /// Deletes the rows of `table` matching `where_sql`.
    fn delete(&self, table: &str, where_sql: &str) -> Result<String> {
        validate::table(table)?;
        validate::where_sql(where_sql)?;

        let mut sql = format!(
            "DELETE{}FROM {}",
            self.clause_separator(),
            self.quote_identifier(table)
        );
        self.push_where(&mut sql, where_sql, self.clause_separator());
        sql.push_str(self.statement_terminator());
        Ok(sql)
    }

    /// Inserts `row_count` rows of `columns.len()` placeholders each.
    fn insert(
        &self,
        table: &str,
        columns: &[&str],
        row_count: i64,
        ignore_duplicates: bool,
    ) -> Result<String> {
        let mut sql = self.insert_body(table, columns, row_count, ignore_duplicates)?;
        sql.push_str(self.statement_terminator());
        Ok(sql)
    }

    /// Inserts rows, updating every column not in `ignore_on_update` when
    /// the row's key already exists.
    ///
    /// Columns keep their original order in the update clause. Ignoring
    /// every column is rejected.
    fn merge(
        &self,
        table: &str,
        columns: &[&str],
        row_count: i64,
        ignore_on_update: &[&str],
    ) -> Result<String> {
        let mut sql = self.insert_body(table, columns, row_count, false)?;

        let update_columns: Vec<&str> = columns
            .iter()
            .copied()
            .filter(|c| !ignore_on_update.contains(c))
            .collect();
        if update_columns.is_empty() {
            return Err(Error::invalid_argument(
                "ignore_on_update",
                "every column is ignored, nothing left to update",
            ));
        }

        sql.push_str(self.clause_separator());
        sql.push_str(&self.upsert_clause(&update_columns));
        sql.push_str(self.statement_terminator());
        Ok(sql)
    }

    /// Single-table select.
    fn select(
        &self,
        table: &str,
        columns: &[&str],
        where_sql: &str,
        options: SelectOptions,
    ) -> Result<String> {
        validate::table(table)?;
        validate::columns("columns", columns)?;
        validate::where_sql(where_sql)?;

        let separator = if options.inner {
            " "
        } else {
            self.clause_separator()
        };
        let distinct = if options.distinct { "DISTINCT " } else { "" };

        let mut sql = format!(
            "SELECT {distinct}{}{separator}FROM {}",
            self.quote_column_list(columns),
            self.quote_identifier(table)
        );
        self.push_where(&mut sql, where_sql, separator);
        if !options.inner {
            sql.push_str(self.statement_terminator());
        }
        Ok(sql)
    }

    /// Select restricted to `count` rows starting at row `offset`.
    fn select_range(
        &self,
        table: &str,
        columns: &[&str],
        where_sql: &str,
        offset: i64,
        count: i64,
    ) -> Result<String> {
        validate::non_negative("offset", offset)?;
        validate::positive("count", count)?;

        let select = self.select(table, columns, where_sql, SelectOptions::default())?;
        let body = select
            .strip_suffix(self.statement_terminator())
            .unwrap_or(&select);
        Ok(format!(
            "{body}{}{}{}",
            self.clause_separator(),
            self.limit_clause(offset, count),
            self.statement_terminator()
        ))
    }

    /// First `count` rows of a select.
    fn select_top(
        &self,
        table: &str,
        columns: &[&str],
        where_sql: &str,
        count: i64,
    ) -> Result<String> {
        self.select_range(table, columns, where_sql, 0, count)
    }

    /// Assigns a placeholder to every column in `set_columns`.
    fn update(&self, table: &str, set_columns: &[&str], where_sql: &str) -> Result<String> {
        validate::table(table)?;
        validate::columns("set_columns", set_columns)?;
        validate::where_sql(where_sql)?;

        let placeholder = self.parameter_placeholder();
        let assignments = set_columns
            .iter()
            .map(|c| format!("{} = {placeholder}", self.quote_identifier(c)))
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!(
            "UPDATE {}{}SET {assignments}",
            self.quote_identifier(table),
            self.clause_separator()
        );
        self.push_where(&mut sql, where_sql, self.clause_separator());
        sql.push_str(self.statement_terminator());
        Ok(sql)
    }

    #[doc(hidden)]
    fn insert_body(
        &self,
        table: &str,
        columns: &[&str],
        row_count: i64,
        ignore_duplicates: bool,
    ) -> Result<String> {
        validate::table(table)?;
        validate::columns("columns", columns)?;
        let rows = validate::row_count(row_count, columns.len(), self.max_placeholders())?;

        let keyword = if ignore_duplicates {
            self.insert_ignore_keyword()
        } else {
            "INSERT INTO"
        };
        let group = self.wrap(&vec![self.parameter_placeholder(); columns.len()].join(", "));
        let groups = vec![group.as_str(); rows].join(", ");
        let separator = self.clause_separator();

        Ok(format!(
            "{keyword} {}{separator}({}){separator}VALUES{separator}{groups}",
            self.quote_identifier(table),
            self.quote_column_list(columns)
        ))
    }

    #[doc(hidden)]
    fn push_where(&self, sql: &mut String, where_sql: &str, separator: &str) {
        if where_sql != ALWAYS_TRUE {
            sql.push_str(separator);
            sql.push_str("WHERE ");
            sql.push_str(where_sql);
        }
    }
}
