#![allow(dead_code)]

use stratum_core::{Dialect, QueryBuilder, SqlValue, Where};

/// MySQL-flavoured builder, local to the integration tests.
#[derive(Debug, Clone, Copy)]
pub struct Backtick;

impl Dialect for Backtick {
    fn name(&self) -> &'static str {
        "backtick"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }
}

impl QueryBuilder for Backtick {
    fn insert_ignore_keyword(&self) -> &'static str {
        "INSERT IGNORE INTO"
    }

    fn upsert_clause(&self, update_columns: &[&str]) -> String {
        let sets: Vec<String> = update_columns
            .iter()
            .map(|c| {
                let q = self.quote_identifier(c);
                format!("{q} = VALUES({q})")
            })
            .collect();
        format!("ON DUPLICATE KEY UPDATE {}", sets.join(", "))
    }

    fn limit_clause(&self, offset: i64, count: i64) -> String {
        format!("LIMIT {offset}, {count}")
    }

    fn last_insert_id_sql(&self) -> &'static str {
        "SELECT LAST_INSERT_ID();"
    }
}

pub fn render(filter: &Where) -> (String, Vec<SqlValue>) {
    filter
        .render(&Backtick)
        .unwrap_or_else(|e| panic!("Failed to render: {filter:?}\nError: {e}"))
        .into_parts()
}

/// Counts `?` outside quoted identifiers.
pub fn placeholder_count(sql: &str) -> usize {
    let mut in_quote = false;
    let mut count = 0;
    for c in sql.chars() {
        match c {
            '`' => in_quote = !in_quote,
            '?' if !in_quote => count += 1,
            _ => {}
        }
    }
    count
}

/// Asserts the placeholder/parameter invariant: one parameter per `?`.
pub fn assert_aligned(filter: &Where) -> (String, Vec<SqlValue>) {
    let (sql, params) = render(filter);
    assert_eq!(
        placeholder_count(&sql),
        params.len(),
        "placeholders and params diverge for {sql}"
    );
    (sql, params)
}

/// Builds a tree of the given depth whose leaves carry consecutive
/// integers, so parameter order can be checked against leaf order.
pub fn nested_tree(depth: usize, next: &mut i64) -> Where {
    if depth == 0 {
        let value = *next;
        *next += 1;
        return match value % 4 {
            0 => Where::eq(format!("c{value}"), value),
            1 => Where::in_set(format!("c{value}"), [value]).expect("non-empty"),
            2 => Where::is_null(format!("n{value}")).and(Where::lt(format!("c{value}"), value)),
            _ => Where::inner_select(
                format!("c{value}"),
                stratum_core::CompareOp::Eq,
                "inner_table",
                "id",
                Where::ge("v", value),
            ),
        };
    }
    let left = nested_tree(depth - 1, next);
    let right = nested_tree(depth - 1, next);
    if depth % 2 == 0 {
        left.and(right)
    } else {
        left.or(right)
    }
}
