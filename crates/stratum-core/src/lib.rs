//! # stratum-core
//!
//! Parameterized SQL generation for single-table CRUD statements.
//!
//! This crate provides:
//! - [`SqlValue`], the closed set of values that can be bound to a placeholder
//! - [`Where`], a composable WHERE expression tree
//! - [`QueryBuilder`], the seam behind which every dialect quirk lives
//!
//! It performs no I/O. Executing the generated statements is the job of
//! `stratum-db`.
//!
//! ## SQL Injection Prevention
//!
//! Values are never written into SQL text. Rendering a filter yields the
//! condition text and, separately, the values for its placeholders in order:
//!
//! ```rust
//! use stratum_core::{QueryBuilder, SqlValue, Where};
//! # use stratum_core::Dialect;
//! # struct Backtick;
//! # impl Dialect for Backtick {
//! #     fn name(&self) -> &'static str { "doc" }
//! #     fn identifier_quote(&self) -> char { '`' }
//! # }
//! # impl QueryBuilder for Backtick {
//! #     fn insert_ignore_keyword(&self) -> &'static str { "INSERT IGNORE INTO" }
//! #     fn upsert_clause(&self, _: &[&str]) -> String { String::new() }
//! #     fn limit_clause(&self, o: i64, c: i64) -> String { format!("LIMIT {o}, {c}") }
//! #     fn last_insert_id_sql(&self) -> &'static str { "SELECT LAST_INSERT_ID();" }
//! # }
//! # let builder = Backtick;
//!
//! let user_input = "'; DROP TABLE users; --";
//! let filter = Where::eq("name", user_input).render(&builder)?;
//! let sql = builder.select("users", &["id"], &filter.sql, Default::default())?;
//!
//! assert_eq!(sql, "SELECT `id`\nFROM `users`\nWHERE (`name` = ?);");
//! assert_eq!(filter.params, vec![SqlValue::Text(user_input.into())]);
//! # Ok::<(), stratum_core::Error>(())
//! ```

pub mod builder;
pub mod dialect;
pub mod error;
pub mod filter;
pub mod value;

mod validate;

#[cfg(test)]
mod testing;

pub use builder::{QueryBuilder, SelectOptions, ALWAYS_TRUE};
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use filter::{BoolGroup, BoolOp, CompareOp, Where, WhereFragment};
pub use value::{ParamKind, SqlValue, ToSqlValue};
