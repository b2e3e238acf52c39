//! SQLite statement fragments.

use stratum_core::{Dialect, QueryBuilder};

use crate::SqliteQueryBuilder;

impl QueryBuilder for SqliteQueryBuilder {
    fn insert_ignore_keyword(&self) -> &'static str {
        "INSERT OR IGNORE INTO"
    }

    fn upsert_clause(&self, update_columns: &[&str]) -> String {
        let updates: Vec<String> = update_columns
            .iter()
            .map(|c| {
                let col = self.quote_identifier(c);
                format!("{col} = excluded.{col}")
            })
            .collect();
        format!("ON CONFLICT DO UPDATE SET {}", updates.join(", "))
    }

    fn limit_clause(&self, offset: i64, count: i64) -> String {
        format!("LIMIT {count} OFFSET {offset}")
    }

    fn last_insert_id_sql(&self) -> &'static str {
        "SELECT last_insert_rowid();"
    }

    fn max_placeholders(&self) -> usize {
        32_766
    }
}
