//! Deliberately artificial dialect for unit tests, so that shared templates
//! are checked independently of any real database's quirks.

use crate::builder::QueryBuilder;
use crate::dialect::Dialect;

#[derive(Debug, Clone, Copy)]
pub struct TestBuilder;

impl Dialect for TestBuilder {
    fn name(&self) -> &'static str {
        "test"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }
}

impl QueryBuilder for TestBuilder {
    fn insert_ignore_keyword(&self) -> &'static str {
        "INSERT SKIPPING INTO"
    }

    fn upsert_clause(&self, update_columns: &[&str]) -> String {
        format!("UPSERT {}", self.quote_column_list(update_columns))
    }

    fn limit_clause(&self, offset: i64, count: i64) -> String {
        format!("TAKE {count} FROM {offset}")
    }

    fn last_insert_id_sql(&self) -> &'static str {
        "SELECT LAST_ID();"
    }

    fn max_placeholders(&self) -> usize {
        100
    }
}
