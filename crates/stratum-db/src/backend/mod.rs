//! sqlx adapters.
//!
//! Both backends share one [`Connection`](crate::Connection) implementation,
//! generated by [`impl_sqlx_connection!`]. They differ only in how a result
//! cell is decoded and in the query that reports the last generated id.

/// Implements [`Connection`](crate::Connection) for a concrete sqlx
/// connection type.
///
/// Usage:
/// ```ignore
/// impl_sqlx_connection! {
///     connection: sqlx::SqliteConnection,
///     database: sqlx::Sqlite,
///     decode_row: decode_row,
///     last_insert_id_sql: SqliteQueryBuilder::new().last_insert_id_sql(),
/// }
/// ```
macro_rules! impl_sqlx_connection {
    (
        connection: $conn:ty,
        database: $db:ty,
        decode_row: $decode:path,
        last_insert_id_sql: $last_id:expr $(,)?
    ) => {
        fn bind_value<'q>(
            query: sqlx::query::Query<'q, $db, <$db as sqlx::Database>::Arguments<'q>>,
            value: stratum_core::SqlValue,
            kind: stratum_core::ParamKind,
        ) -> sqlx::query::Query<'q, $db, <$db as sqlx::Database>::Arguments<'q>> {
            use stratum_core::{ParamKind, SqlValue};

            match (value, kind) {
                (SqlValue::Null, _) => query.bind(Option::<String>::None),
                (SqlValue::Bool(b), _) => query.bind(b),
                (SqlValue::Int(n), _) => query.bind(n),
                (SqlValue::Float(x), _) => query.bind(x),
                (SqlValue::Text(s), ParamKind::Binary) => query.bind(s.into_bytes()),
                (SqlValue::Text(s), ParamKind::Scalar) => query.bind(s),
                (SqlValue::Blob(bytes), _) => query.bind(bytes),
            }
        }

        #[async_trait::async_trait]
        impl $crate::connection::Connection for $conn {
            type Statement = $crate::connection::BufferedStatement;

            async fn prepare(
                &mut self,
                sql: &str,
            ) -> stratum_core::Result<$crate::connection::BufferedStatement> {
                let prepared = sqlx::Executor::prepare(&mut *self, sql)
                    .await
                    .map_err($crate::error::driver_error)?;
                let returns_rows = !sqlx::Statement::columns(&prepared).is_empty();
                Ok($crate::connection::BufferedStatement::new(sql, returns_rows))
            }

            async fn execute(
                &mut self,
                statement: &mut $crate::connection::BufferedStatement,
            ) -> stratum_core::Result<()> {
                let sql = statement.sql().to_owned();
                let mut query = sqlx::query::<$db>(&sql);
                for (value, kind) in statement.bindings()? {
                    query = bind_value(query, value, kind);
                }

                if statement.returns_rows() {
                    let rows = query
                        .fetch_all(&mut *self)
                        .await
                        .map_err($crate::error::driver_error)?;
                    let decoded = rows
                        .iter()
                        .map($decode)
                        .collect::<stratum_core::Result<Vec<_>>>()?;
                    statement.set_rows(decoded);
                } else {
                    let done = query
                        .execute(&mut *self)
                        .await
                        .map_err($crate::error::driver_error)?;
                    statement.set_affected(done.rows_affected());
                }
                Ok(())
            }

            async fn last_insert_id(
                &mut self,
                column: Option<&str>,
            ) -> stratum_core::Result<stratum_core::SqlValue> {
                if let Some(column) = column {
                    tracing::debug!(column, "Sequence name ignored by this backend");
                }
                let row = sqlx::query::<$db>($last_id)
                    .fetch_optional(&mut *self)
                    .await
                    .map_err($crate::error::driver_error)?;
                let id = match row {
                    Some(row) => $decode(&row)?.into_iter().next(),
                    None => None,
                };
                Ok(id.unwrap_or(stratum_core::SqlValue::Null))
            }
        }
    };
}

pub mod mysql;
pub mod sqlite;
