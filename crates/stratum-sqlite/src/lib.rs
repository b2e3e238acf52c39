//! # stratum-sqlite
//!
//! SQLite statement templates for `stratum-core`.
//!
//! # How SQLite differs from other dialects
//!
//! - **[UPSERT]**: SQLite supports `INSERT ... ON CONFLICT DO UPDATE SET ...`
//!   (since SQLite 3.24.0, and without a conflict target since 3.35.0).
//!   The row being inserted is referred to through the `excluded` table.
//! - **Insert-ignore**: spelled `INSERT OR IGNORE`, one of the
//!   [conflict resolution] algorithms.
//! - **Identifier quoting**: SQLite uses double quotes (`"`) as
//!   the standard quoting style, though it also accepts backticks
//!   and square brackets. See [SQLite keywords].
//! - **[LIMIT]**: the offset is written as `LIMIT count OFFSET offset`.
//!   SQLite also accepts `LIMIT offset, count`, but the explicit form
//!   avoids the reversed argument order.
//!
//! [UPSERT]: https://www.sqlite.org/lang_upsert.html
//! [conflict resolution]: https://www.sqlite.org/lang_conflict.html
//! [SQLite keywords]: https://www.sqlite.org/lang_keywords.html
//! [LIMIT]: https://www.sqlite.org/lang_select.html#the_limit_clause
//!
//! ## Example
//!
//! ```rust
//! use stratum_core::QueryBuilder;
//! use stratum_sqlite::SqliteQueryBuilder;
//!
//! let sql = SqliteQueryBuilder::new()
//!     .merge("users", &["id", "name", "email"], 1, &["id"])
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "INSERT INTO \"users\"\n(\"id\", \"name\", \"email\")\nVALUES\n(?, ?, ?)\n\
//!      ON CONFLICT DO UPDATE SET \"name\" = excluded.\"name\", \"email\" = excluded.\"email\";"
//! );
//! ```

mod builder;
mod dialect;

pub use dialect::SqliteQueryBuilder;
