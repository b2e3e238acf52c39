//! MySQL statement fragments.

use stratum_core::{Dialect, QueryBuilder};

use crate::MySqlQueryBuilder;

impl QueryBuilder for MySqlQueryBuilder {
    fn insert_ignore_keyword(&self) -> &'static str {
        "INSERT IGNORE INTO"
    }

    fn upsert_clause(&self, update_columns: &[&str]) -> String {
        let separator = self.clause_separator();
        let assignments = update_columns
            .iter()
            .map(|c| {
                let column = self.quote_identifier(c);
                format!("{column} = VALUES({column})")
            })
            .collect::<Vec<_>>()
            .join(&format!(",{separator}"));
        format!("ON DUPLICATE KEY{separator}UPDATE{separator}{assignments}")
    }

    fn limit_clause(&self, offset: i64, count: i64) -> String {
        format!("LIMIT {offset}, {count}")
    }

    fn last_insert_id_sql(&self) -> &'static str {
        "SELECT LAST_INSERT_ID();"
    }

    fn max_placeholders(&self) -> usize {
        65_535
    }
}
