use super::init::{migrate, open_at};
use super::operations::*;
use anyhow::Result;
use rusqlite::Connection;

fn setup_test_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    migrate(&conn)?;
    Ok(conn)
}

#[test]
fn test_migrate_creates_table() {
    let conn = Connection::open_in_memory().unwrap();
    migrate(&conn).unwrap();

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='kv_store'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_migrate_is_idempotent() {
    let conn = setup_test_db().unwrap();
    migrate(&conn).unwrap();
}

#[test]
fn test_get_missing_key() {
    let conn = setup_test_db().unwrap();
    assert!(get_value(&conn, "employees").unwrap().is_none());
}

#[test]
fn test_set_then_get() {
    let conn = setup_test_db().unwrap();
    set_value(&conn, "employees", "[]").unwrap();

    let stored = get_value(&conn, "employees").unwrap().unwrap();
    assert_eq!(stored.key, "employees");
    assert_eq!(stored.value, "[]");
    assert!(!stored.updated_at.is_empty());
}

#[test]
fn test_set_overwrites() {
    let conn = setup_test_db().unwrap();
    set_value(&conn, "employees", "[]").unwrap();
    set_value(&conn, "employees", "[{\"id\":\"emp_1\"}]").unwrap();

    let stored = get_value(&conn, "employees").unwrap().unwrap();
    assert_eq!(stored.value, "[{\"id\":\"emp_1\"}]");

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_open_at_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("meetcost.db");

    let conn = open_at(&path).unwrap();
    set_value(&conn, "k", "v").unwrap();
    drop(conn);

    let conn = open_at(&path).unwrap();
    assert_eq!(get_value(&conn, "k").unwrap().unwrap().value, "v");
}
