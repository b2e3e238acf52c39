//! MySQL dialect implementation.

use stratum_core::Dialect;

/// MySQL dialect and query builder.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlQueryBuilder;

impl MySqlQueryBuilder {
    /// Creates a new MySQL query builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlQueryBuilder {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }
}
