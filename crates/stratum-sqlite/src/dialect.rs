//! SQLite dialect implementation.

use stratum_core::Dialect;

/// SQLite dialect and query builder.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteQueryBuilder;

impl SqliteQueryBuilder {
    /// Creates a new SQLite query builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteQueryBuilder {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn identifier_quote(&self) -> char {
        '"' // SQLite also accepts backticks, but double quotes are standard
    }
}
