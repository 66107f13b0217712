use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn run_cmd(db_path: &Path, args: &[&str]) -> String {
    let output = cargo_bin_cmd!("rolo")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(db_path: &Path, args: &[&str]) -> Value {
    let output = cargo_bin_cmd!("rolo")
        .args(["--db-path", db_path.to_str().expect("db path"), "--json"])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn cli_add_and_list_offline_flow() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("rolo.sqlite3");

    // Without a session the contact lands in the local partition and the
    // user is told to log in; no remote call is attempted.
    let notice = run_cmd(
        &db_path,
        &[
            "add",
            "--name",
            "Jane Doe",
            "--email",
            "jane@x.com",
            "--phone",
            "+44 20 7946 0958",
        ],
    );
    assert!(notice.contains("log in"), "unexpected notice: {notice}");

    let list = run_cmd_json(&db_path, &["list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Jane Doe");
    assert_eq!(items[0]["country_code"], "+44");
    assert_eq!(items[0]["phone"], "2079460958");
    assert_eq!(items[0]["category"], "general");
    assert_eq!(items[0]["source"], "Manual entry");
    assert!(items[0]["user_id"].is_null());
    assert!(items[0]["synced_at"].is_null());
}

#[test]
fn cli_add_rejects_missing_fields() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("rolo.sqlite3");

    let output = cargo_bin_cmd!("rolo")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(["add", "--name", "  ", "--email", "x@y.com", "--phone", "123"])
        .output()
        .expect("run command");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(3));

    let list = run_cmd_json(&db_path, &["list"]);
    assert!(list.as_array().expect("array").is_empty());
}

#[test]
fn cli_list_filters_by_category() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("rolo.sqlite3");

    run_cmd(
        &db_path,
        &[
            "add",
            "--name",
            "Dr. Smith",
            "--email",
            "smith@clinic.com",
            "--phone",
            "4155551212",
            "--category",
            "doctor",
        ],
    );
    run_cmd(
        &db_path,
        &[
            "add",
            "--name",
            "Jane Doe",
            "--email",
            "jane@x.com",
            "--phone",
            "4155551213",
        ],
    );

    let doctors = run_cmd_json(&db_path, &["list", "--category", "doctor"]);
    let items = doctors.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Dr. Smith");
}

#[test]
fn cli_import_rejects_unreadable_file() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("rolo.sqlite3");
    let bogus = temp.path().join("not-a-spreadsheet.xlsx");
    std::fs::write(&bogus, b"plain text, not a workbook").expect("write file");

    let output = cargo_bin_cmd!("rolo")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(["import", bogus.to_str().expect("path")])
        .output()
        .expect("run command");
    assert!(!output.status.success());

    // A failed parse must leave the cache untouched.
    let list = run_cmd_json(&db_path, &["list"]);
    assert!(list.as_array().expect("array").is_empty());
    let files = run_cmd_json(&db_path, &["files"]);
    assert!(files.as_array().expect("array").is_empty());
}

#[test]
fn cli_clear_empties_the_local_partition() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("rolo.sqlite3");

    run_cmd(
        &db_path,
        &[
            "add",
            "--name",
            "Jane Doe",
            "--email",
            "jane@x.com",
            "--phone",
            "4155551212",
        ],
    );
    run_cmd(&db_path, &["clear"]);

    let list = run_cmd_json(&db_path, &["list"]);
    assert!(list.as_array().expect("array").is_empty());
}

#[test]
fn cli_whoami_without_session() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("rolo.sqlite3");

    let output = run_cmd(&db_path, &["whoami"]);
    assert!(output.contains("not logged in"));

    let json = run_cmd_json(&db_path, &["whoami"]);
    assert!(json["user_id"].is_null());
}

#[test]
fn cli_sync_requires_a_session() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("rolo.sqlite3");

    let output = cargo_bin_cmd!("rolo")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(["sync"])
        .output()
        .expect("run command");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(3));
}
