use rolo_store::Store;
use tempfile::TempDir;

#[test]
fn migrations_apply_once() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");

    assert_eq!(store.schema_version().expect("schema version"), 1);
}

#[test]
fn migrated_database_reopens_from_disk() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("rolo.sqlite3");

    {
        let store = Store::open(&path).expect("open");
        store.migrate().expect("migrate");
    }

    let store = Store::open(&path).expect("reopen");
    assert_eq!(store.schema_version().expect("schema version"), 1);
}
