//! SQLite adapter.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{ConnectOptions, Row as _, SqliteConnection, TypeInfo as _, ValueRef as _};
use stratum_core::{QueryBuilder, Result, SqlValue};
use stratum_sqlite::SqliteQueryBuilder;
use tracing::{info, warn};

use crate::connection::Row;
use crate::error::{connection_error, driver_error};

impl_sqlx_connection! {
    connection: SqliteConnection,
    database: sqlx::Sqlite,
    decode_row: decode_row,
    last_insert_id_sql: SqliteQueryBuilder::new().last_insert_id_sql(),
}

/// Opens a SQLite database from a `sqlite:` URL or a plain file path.
///
/// # Errors
///
/// Returns [`stratum_core::Error::Connection`] with the target and its file
/// path removed from the driver's message.
pub async fn connect_sqlite(target: &str) -> Result<SqliteConnection> {
    let path = target
        .strip_prefix("sqlite://")
        .or_else(|| target.strip_prefix("sqlite:"))
        .unwrap_or(target);
    let path = path.split('?').next().unwrap_or(path);
    let secrets = [target, path];

    let options = if target.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(target).map_err(|e| connection_error(&e, &secrets))?
    } else {
        SqliteConnectOptions::new().filename(target)
    };

    match options.connect().await {
        Ok(conn) => {
            info!(backend = "sqlite", "Connected to database");
            Ok(conn)
        }
        Err(e) => {
            let err = connection_error(&e, &secrets);
            warn!(backend = "sqlite", error = %err, "Failed to connect");
            Err(err)
        }
    }
}

/// Decodes a row by the storage class of each value.
pub(crate) fn decode_row(row: &SqliteRow) -> Result<Row> {
    (0..row.len()).map(|i| decode_cell(row, i)).collect()
}

fn decode_cell(row: &SqliteRow, index: usize) -> Result<SqlValue> {
    let storage = {
        let raw = row.try_get_raw(index).map_err(driver_error)?;
        if raw.is_null() {
            return Ok(SqlValue::Null);
        }
        raw.type_info().name().to_ascii_uppercase()
    };

    let value = match storage.as_str() {
        "INTEGER" | "BOOLEAN" => row.try_get_unchecked::<i64, _>(index).map(SqlValue::Int),
        "REAL" | "NUMERIC" => row.try_get_unchecked::<f64, _>(index).map(SqlValue::Float),
        "BLOB" => row.try_get_unchecked::<Vec<u8>, _>(index).map(SqlValue::Blob),
        _ => row.try_get_unchecked::<String, _>(index).map(SqlValue::Text),
    };
    value.map_err(driver_error)
}
