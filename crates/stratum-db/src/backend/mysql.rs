//! MySQL adapter.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::mysql::{MySqlConnectOptions, MySqlRow};
use sqlx::{ConnectOptions, MySqlConnection, Row as _, TypeInfo as _, ValueRef as _};
use stratum_core::{Error, QueryBuilder, Result, SqlValue};
use stratum_mysql::MySqlQueryBuilder;
use tracing::{info, warn};

use crate::config::{Backend, ConnectionConfig};
use crate::connection::Row;
use crate::error::{connection_error, driver_error};

impl_sqlx_connection! {
    connection: MySqlConnection,
    database: sqlx::MySql,
    decode_row: decode_row,
    last_insert_id_sql: MySqlQueryBuilder::new().last_insert_id_sql(),
}

/// Opens a MySQL connection described by `config`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `config` is not a MySQL config, and
/// [`Error::Connection`] if the server cannot be reached or rejects the
/// login. The connection error never contains the username, the password or
/// the connection URL.
pub async fn connect_mysql(config: &ConnectionConfig) -> Result<MySqlConnection> {
    if config.backend != Backend::MySql {
        return Err(Error::invalid_argument("backend", "expected a mysql config"));
    }

    let mut options = MySqlConnectOptions::new()
        .host(&config.host)
        .database(&config.database)
        .charset(&config.charset);
    if let Some(port) = config.port {
        options = options.port(port);
    }
    if !config.username.is_empty() {
        options = options.username(&config.username);
    }
    if !config.password.is_empty() {
        options = options.password(&config.password);
    }

    match options.connect().await {
        Ok(conn) => {
            info!(
                backend = "mysql",
                host = %config.host,
                database = %config.database,
                "Connected to database"
            );
            Ok(conn)
        }
        Err(e) => {
            let url = config.to_url().unwrap_or_default();
            let err = connection_error(&e, &[&url, &config.password, &config.username]);
            warn!(backend = "mysql", host = %config.host, error = %err, "Failed to connect");
            Err(err)
        }
    }
}

/// Decodes a row by the declared type of each column.
pub(crate) fn decode_row(row: &MySqlRow) -> Result<Row> {
    (0..row.len()).map(|i| decode_cell(row, i)).collect()
}

fn decode_cell(row: &MySqlRow, index: usize) -> Result<SqlValue> {
    let column_type = {
        let raw = row.try_get_raw(index).map_err(driver_error)?;
        if raw.is_null() {
            return Ok(SqlValue::Null);
        }
        raw.type_info().name().to_ascii_uppercase()
    };

    let value = match column_type.as_str() {
        "BOOLEAN" => row.try_get_unchecked::<bool, _>(index).map(SqlValue::Bool),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            row.try_get_unchecked::<i64, _>(index).map(SqlValue::Int)
        }
        t if t.ends_with("UNSIGNED") || t == "YEAR" => {
            row.try_get_unchecked::<u64, _>(index).map(unsigned)
        }
        "FLOAT" => row
            .try_get_unchecked::<f32, _>(index)
            .map(|x| SqlValue::Float(f64::from(x))),
        "DOUBLE" => row.try_get_unchecked::<f64, _>(index).map(SqlValue::Float),
        "DATETIME" | "TIMESTAMP" => row
            .try_get_unchecked::<NaiveDateTime, _>(index)
            .map(|t| SqlValue::Text(t.to_string())),
        "DATE" => row
            .try_get_unchecked::<NaiveDate, _>(index)
            .map(|d| SqlValue::Text(d.to_string())),
        "TIME" => row
            .try_get_unchecked::<NaiveTime, _>(index)
            .map(|t| SqlValue::Text(t.to_string())),
        "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" | "BIT"
        | "GEOMETRY" => row.try_get_unchecked::<Vec<u8>, _>(index).map(SqlValue::Blob),
        _ => row
            .try_get_unchecked::<String, _>(index)
            .map(SqlValue::Text)
            .or_else(|_| row.try_get_unchecked::<Vec<u8>, _>(index).map(SqlValue::Blob)),
    };
    value.map_err(driver_error)
}

/// BIGINT UNSIGNED values above `i64::MAX` are kept exact as text.
fn unsigned(n: u64) -> SqlValue {
    i64::try_from(n).map_or_else(|_| SqlValue::Text(n.to_string()), SqlValue::Int)
}
