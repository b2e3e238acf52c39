mod common;

use common::{connection, database, int, seeded, text};
use stratum_core::{CompareOp, Error, SqlValue, Where};
use stratum_db::{execute_cell_reader, execute_collection_reader, multi_execute, ParamRow};

#[tokio::test]
async fn test_insert_and_count() {
    let mut db = seeded().await;
    assert_eq!(db.count_rows("users", &Where::always()).await.unwrap(), 3);
    assert_eq!(
        db.count_rows("users", &Where::is_null("email")).await.unwrap(),
        1
    );
    assert_eq!(
        db.count_rows("users", &Where::is_not_null("email"))
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_insert_reports_per_row_counts() {
    let mut db = database().await;
    let counts = db
        .insert(
            "users",
            &["name"],
            vec![vec![text("ann")], vec![text("bob")]],
            false,
        )
        .await
        .unwrap();
    assert_eq!(counts, vec![1, 1]);
}

#[tokio::test]
async fn test_insert_ignore_skips_duplicates() {
    let mut db = seeded().await;
    let counts = db
        .insert(
            "users",
            &["name", "age"],
            vec![vec![text("ann"), int(99)], vec![text("dan"), int(19)]],
            true,
        )
        .await
        .unwrap();
    assert_eq!(counts, vec![0, 1]);

    let age = db
        .retrieve_first(&["age"], "users", &Where::eq("name", "ann"))
        .await
        .unwrap();
    assert_eq!(age, Some(vec![int(30)]));
}

#[tokio::test]
async fn test_duplicate_insert_is_driver_error() {
    let mut db = seeded().await;
    let err = db
        .insert("users", &["name"], vec![vec![text("bob")]], false)
        .await
        .unwrap_err();
    let Error::Driver(message) = err else {
        panic!("expected driver error, got {err:?}");
    };
    assert!(message.contains("UNIQUE constraint failed"), "{message}");
}

#[tokio::test]
async fn test_last_insert_id() {
    let mut db = seeded().await;
    assert_eq!(db.last_insert_id(None).await.unwrap(), int(3));
}

#[tokio::test]
async fn test_retrieve_all_with_filter() {
    let mut db = seeded().await;
    let rows = db
        .retrieve_all(&["name", "age"], "users", &Where::gt("age", 26), false)
        .await
        .unwrap();
    assert_eq!(
        rows,
        vec![vec![text("ann"), int(30)], vec![text("cid"), int(41)]]
    );
}

#[tokio::test]
async fn test_retrieve_range() {
    let mut db = seeded().await;
    let rows = db
        .retrieve_range(&["name"], "users", &Where::always(), 1, 1)
        .await
        .unwrap();
    assert_eq!(rows, vec![vec![text("bob")]]);
}

#[tokio::test]
async fn test_retrieve_first_missing() {
    let mut db = seeded().await;
    assert!(db
        .retrieve_first(&["*"], "users", &Where::eq("name", "zed"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_update() {
    let mut db = seeded().await;
    let affected = db
        .update(
            "users",
            vec![("email", text("bob@example.net")), ("age", int(26))],
            &Where::eq("name", "bob"),
        )
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let row = db
        .retrieve_first(&["email", "age"], "users", &Where::eq("name", "bob"))
        .await
        .unwrap();
    assert_eq!(row, Some(vec![text("bob@example.net"), int(26)]));
}

#[tokio::test]
async fn test_merge_updates_existing_and_inserts_new() {
    let mut db = seeded().await;
    db.merge(
        "users",
        &["name", "age"],
        vec![vec![text("ann"), int(31)], vec![text("dan"), int(20)]],
        &["name"],
    )
    .await
    .unwrap();

    assert_eq!(db.count_rows("users", &Where::always()).await.unwrap(), 4);
    let ann = db
        .retrieve_first(&["age", "email"], "users", &Where::eq("name", "ann"))
        .await
        .unwrap();
    // Columns outside the insert keep their value.
    assert_eq!(ann, Some(vec![int(31), text("ann@example.com")]));
}

#[tokio::test]
async fn test_delete_in_set() {
    let mut db = seeded().await;
    let filter = Where::in_set("name", ["ann", "cid", "zed"]).unwrap();
    assert_eq!(db.delete("users", &filter).await.unwrap(), 2);
    assert_eq!(db.count_rows("users", &Where::always()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_everything() {
    let mut db = seeded().await;
    assert_eq!(db.delete("users", &Where::always()).await.unwrap(), 3);
}

#[tokio::test]
async fn test_inner_select_and_like() {
    let mut db = seeded().await;
    let filter = Where::inner_select("id", CompareOp::Eq, "users", "id", Where::eq("name", "cid"))
        .or(Where::like("email", "%@example.com"));
    let rows = db
        .retrieve_all(&["name"], "users", &filter, false)
        .await
        .unwrap();
    assert_eq!(rows, vec![vec![text("ann")], vec![text("cid")]]);
}

#[tokio::test]
async fn test_blob_and_real_values() {
    let mut db = database().await;
    let avatar = vec![0_u8, 159, 146, 150, 255];
    db.insert(
        "users",
        &["name", "score", "avatar"],
        vec![vec![
            text("eve"),
            SqlValue::Float(9.5),
            SqlValue::Blob(avatar.clone()),
        ]],
        false,
    )
    .await
    .unwrap();

    let row = db
        .retrieve_first(&["score", "avatar", "email"], "users", &Where::always())
        .await
        .unwrap();
    assert_eq!(
        row,
        Some(vec![SqlValue::Float(9.5), SqlValue::Blob(avatar), SqlValue::Null])
    );

    let found = db
        .count_rows("users", &Where::eq("avatar", vec![0_u8, 159, 146, 150, 255]))
        .await
        .unwrap();
    assert_eq!(found, 1);
}

#[tokio::test]
async fn test_multi_execute_with_scalar_rows() {
    let mut conn = connection().await;
    let counts = multi_execute(
        &mut conn,
        "INSERT INTO \"users\" (\"name\") VALUES (?)",
        vec![ParamRow::from(text("ann")), ParamRow::from(text("bob"))],
    )
    .await
    .unwrap();
    assert_eq!(counts, vec![1, 1]);

    let rows = execute_collection_reader(&mut conn, "SELECT name FROM users", &[])
        .await
        .unwrap();
    assert_eq!(rows, vec![vec![text("ann")], vec![text("bob")]]);
}

#[tokio::test]
async fn test_unknown_table_is_driver_error() {
    let mut db = database().await;
    let err = db
        .count_rows("missing", &Where::always())
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::Driver(ref m) if m.contains("no such table")),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_cell_reader_out_of_range() {
    let mut conn = connection().await;
    let err = execute_cell_reader(&mut conn, "SELECT 1, 2", &[], 2)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let cell = execute_cell_reader(&mut conn, "SELECT 1, 2", &[], 1)
        .await
        .unwrap();
    assert_eq!(cell, Some(int(2)));
}
