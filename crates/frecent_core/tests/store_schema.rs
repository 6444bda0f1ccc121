use frecent_core::db::migrations::latest_version;
use frecent_core::db::{open_store, open_store_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_store_in_memory_applies_all_migrations() {
    let conn = open_store_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "owners");
    assert_table_exists(&conn, "repositories");
    assert_table_exists(&conn, "entries");
    assert_index_exists(&conn, "idx_entries_frecency");
}

#[test]
fn opening_same_store_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frecent.db");

    let conn_first = open_store(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    conn_first
        .execute(
            "INSERT INTO owners (id, name) VALUES ('O_1', 'octo');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_store(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let owners: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM owners;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(owners, 1);
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_store(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn file_store_runs_in_wal_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wal.db");

    let conn = open_store(&path).unwrap();
    let mode: String = conn
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_ascii_lowercase(), "wal");
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_store_in_memory().unwrap();

    let err = conn.execute(
        "INSERT INTO repositories (id, name, owner_id) VALUES ('R_1', 'widgets', 'missing');",
        [],
    );
    assert!(err.is_err(), "orphan repository row must be rejected");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

fn assert_index_exists(conn: &Connection, index_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'index' AND name = ?1
            );",
            [index_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "index {index_name} does not exist");
}
