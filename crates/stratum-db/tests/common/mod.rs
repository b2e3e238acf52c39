#![allow(dead_code)]

use sqlx::SqliteConnection;
use stratum_core::SqlValue;
use stratum_db::{connect_sqlite, execute_non_query, SqliteDatabase};
use stratum_sqlite::SqliteQueryBuilder;

pub const SCHEMA: &str = "CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    email TEXT,
    age INTEGER,
    score REAL,
    avatar BLOB
)";

pub async fn connection() -> SqliteConnection {
    let mut conn = connect_sqlite("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    execute_non_query(&mut conn, SCHEMA, &[])
        .await
        .expect("Failed to create schema");
    conn
}

pub async fn database() -> SqliteDatabase {
    SqliteDatabase::new(connection().await, SqliteQueryBuilder::new())
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

pub fn int(n: i64) -> SqlValue {
    SqlValue::Int(n)
}

/// Seeds three users: ann (30), bob (25, no email) and cid (41).
pub async fn seeded() -> SqliteDatabase {
    let mut db = database().await;
    db.insert(
        "users",
        &["name", "email", "age"],
        vec![
            vec![text("ann"), text("ann@example.com"), int(30)],
            vec![text("bob"), SqlValue::Null, int(25)],
            vec![text("cid"), text("cid@example.org"), int(41)],
        ],
        false,
    )
    .await
    .expect("Failed to seed users");
    db
}
