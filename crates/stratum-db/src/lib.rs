//! # stratum-db
//!
//! Executes the statements built by `stratum-core`.
//!
//! This crate provides:
//! - the [`Connection`] / [`PreparedStatement`] driver seam
//! - the [`engine`]: `execute` plus the collection, row, cell and non-query
//!   readers and `multi_execute`
//! - sqlx adapters for MySQL and SQLite, with credential-safe connects
//! - [`Database`], a table-level CRUD facade
//!
//! ## Quick Start
//!
//! ```ignore
//! use stratum_core::{ToSqlValue, Where};
//! use stratum_db::{connect_sqlite, Database};
//! use stratum_sqlite::SqliteQueryBuilder;
//!
//! let conn = connect_sqlite("sqlite::memory:").await?;
//! let mut db = Database::new(conn, SqliteQueryBuilder::new());
//!
//! db.insert(
//!     "users",
//!     &["name", "email"],
//!     vec![vec!["ann".to_sql_value(), "ann@example.com".to_sql_value()]],
//!     false,
//! )
//! .await?;
//!
//! let active = db
//!     .count_rows("users", &Where::eq("active", true).and(Where::is_null("deleted_at")))
//!     .await?;
//! ```

mod backend;
pub mod config;
pub mod connection;
mod database;
pub mod engine;
mod error;

#[cfg(test)]
mod testing;

pub use backend::mysql::connect_mysql;
pub use backend::sqlite::connect_sqlite;
pub use config::{Backend, ConnectionConfig};
pub use connection::{BufferedStatement, Connection, PreparedStatement, Row};
pub use database::Database;
pub use engine::{
    affected_rows, execute, execute_cell_reader, execute_collection_reader, execute_non_query,
    execute_row_reader, last_insert_id, multi_execute, ParamRow,
};

/// Facade over a MySQL connection.
pub type MySqlDatabase = Database<sqlx::MySqlConnection, stratum_mysql::MySqlQueryBuilder>;

/// Facade over a SQLite connection.
pub type SqliteDatabase = Database<sqlx::SqliteConnection, stratum_sqlite::SqliteQueryBuilder>;
