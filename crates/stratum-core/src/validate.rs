//! Argument checks shared by the statement templates.
//!
//! Every check runs before any SQL text is produced.

use crate::error::{Error, Result};

pub fn table(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument("table", "must not be empty"));
    }
    Ok(())
}

pub fn column(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument("column", "must not be empty"));
    }
    Ok(())
}

pub fn columns(argument: &'static str, names: &[&str]) -> Result<()> {
    if names.is_empty() {
        return Err(Error::invalid_argument(
            argument,
            "must contain at least one column",
        ));
    }
    if let Some(index) = names.iter().position(|c| c.is_empty()) {
        return Err(Error::invalid_argument(
            argument,
            format!("column at index {index} is empty"),
        ));
    }
    Ok(())
}

pub fn where_sql(sql: &str) -> Result<()> {
    if sql.trim().is_empty() {
        return Err(Error::invalid_argument("where_sql", "must not be empty"));
    }
    Ok(())
}

pub fn positive(argument: &'static str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(Error::invalid_argument(
            argument,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(())
}

/// Checks a multi-row statement's row count and returns it as a `usize`.
pub fn row_count(row_count: i64, columns: usize, max_placeholders: usize) -> Result<usize> {
    positive("row_count", row_count)?;
    usize::try_from(row_count)
        .ok()
        .filter(|rows| rows.checked_mul(columns).is_some_and(|n| n <= max_placeholders))
        .ok_or_else(|| {
            Error::invalid_argument(
                "row_count",
                format!(
                    "{row_count} rows of {columns} columns exceed {max_placeholders} placeholders"
                ),
            )
        })
}

pub fn non_negative(argument: &'static str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(Error::invalid_argument(
            argument,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}
