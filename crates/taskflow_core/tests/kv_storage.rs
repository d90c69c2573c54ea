use rusqlite::Connection;
use taskflow_core::db::migrations::latest_version;
use taskflow_core::db::{open_db, open_db_in_memory, DbError};
use taskflow_core::{
    KeyValueStore, Priority, RepoError, SqliteKeyValueStore, TaskStore, TASKS_STORAGE_KEY,
};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    SqliteKeyValueStore::try_new(&conn).unwrap();
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
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
fn unmigrated_connection_is_rejected() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKeyValueStore::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn sqlite_store_upserts_single_slot() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert_eq!(store.read(TASKS_STORAGE_KEY).unwrap(), None);
    store.write(TASKS_STORAGE_KEY, "[]").unwrap();
    store.write(TASKS_STORAGE_KEY, "[1]").unwrap();
    assert_eq!(store.read(TASKS_STORAGE_KEY).unwrap().as_deref(), Some("[1]"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn tasks_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskflow.sqlite3");

    let task = {
        let conn = open_db(&path).unwrap();
        let mut store = TaskStore::load(SqliteKeyValueStore::try_new(&conn).unwrap()).unwrap();
        let task = store.add("Call mom", Priority::High, "personal").unwrap().unwrap();
        store.add("Buy milk", Priority::Low, "shopping").unwrap();
        task
    };

    let conn = open_db(&path).unwrap();
    let store = TaskStore::load(SqliteKeyValueStore::try_new(&conn).unwrap()).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.tasks()[1], task);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
