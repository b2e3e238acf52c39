//! # stratum-mysql
//!
//! MySQL statement templates for `stratum-core`.
//!
//! # How MySQL differs from other dialects
//!
//! - **Identifier quoting**: MySQL quotes identifiers with backticks
//!   (`` ` ``) unless `ANSI_QUOTES` is enabled. See [MySQL identifiers].
//! - **[INSERT IGNORE]**: rows that would violate a unique key are
//!   skipped instead of failing the statement.
//! - **[ON DUPLICATE KEY UPDATE]**: the upsert form refers to the row
//!   being inserted through `VALUES(col)`.
//! - **[LIMIT]**: the two-argument form is `LIMIT offset, count`.
//!
//! [MySQL identifiers]: https://dev.mysql.com/doc/refman/8.0/en/identifiers.html
//! [INSERT IGNORE]: https://dev.mysql.com/doc/refman/8.0/en/insert.html
//! [ON DUPLICATE KEY UPDATE]: https://dev.mysql.com/doc/refman/8.0/en/insert-on-duplicate.html
//! [LIMIT]: https://dev.mysql.com/doc/refman/8.0/en/select.html
//!
//! ## Example
//!
//! ```rust
//! use stratum_core::QueryBuilder;
//! use stratum_mysql::MySqlQueryBuilder;
//!
//! let sql = MySqlQueryBuilder::new()
//!     .merge("users", &["id", "name", "created_at"], 1, &["created_at"])
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "INSERT INTO `users`\n(`id`, `name`, `created_at`)\nVALUES\n(?, ?, ?)\n\
//!      ON DUPLICATE KEY\nUPDATE\n`id` = VALUES(`id`),\n`name` = VALUES(`name`);"
//! );
//! ```

mod builder;
mod dialect;

pub use dialect::MySqlQueryBuilder;
