// End-to-end tests driving the compiled binary against temp database files.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

const BIN: &str = env!("CARGO_BIN_EXE_sqltutor");

fn run(args: &[&str]) -> Output {
    Command::new(BIN).args(args).output().expect("failed to run sqltutor")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn command_mode_persists_across_invocations() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("practice.db");
    let db = db.to_str().unwrap();

    let output = run(&[db, "-c", "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)"]);
    assert!(output.status.success(), "CREATE TABLE should succeed");

    let output = run(&[db, "-c", "INSERT INTO users VALUES (1, 'Alice')"]);
    assert!(output.status.success(), "INSERT should succeed");
    assert!(stdout(&output).contains("1 row(s) affected"));

    assert!(std::path::Path::new(db).exists(), "database file should exist");

    // A fresh invocation sees the committed data.
    let output = run(&["--format", "csv", db, "-c", "SELECT name FROM users"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("name"), "csv header expected: {text}");
    assert!(text.contains("Alice"), "inserted row expected: {text}");
}

#[test]
fn seed_flag_creates_practice_data() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("warehouse.db");
    let db = db.to_str().unwrap();

    let output = run(&[db, "--seed", "-c", "SELECT COUNT(*) AS n FROM inventory"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Seeded practice data: 10 inventory row(s), 8 order row(s)"));
    assert!(text.contains("10"), "seeded inventory count expected: {text}");

    // Seeding again inserts nothing new.
    let output = run(&[db, "--seed", "-c", "SELECT COUNT(*) AS n FROM inventory"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Seeded practice data: 0 inventory row(s), 0 order row(s)"));
}

#[test]
fn piped_stdin_runs_as_script() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("t.db");

    let mut child = Command::new(BIN)
        .arg(db.to_str().unwrap())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sqltutor");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"CREATE TABLE t (id INTEGER);\nINSERT INTO t VALUES (7);\nSELECT id FROM t;\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("1 row(s) affected"), "insert count expected: {text}");
    assert!(text.contains('7'), "selected value expected: {text}");
}

#[test]
fn script_with_failing_statement_exits_nonzero() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("t.db");
    let db = db.to_str().unwrap();

    let output = run(&[
        db,
        "-c",
        "CREATE TABLE t (id INTEGER PRIMARY KEY); INSERT INTO t VALUES (1); INSERT INTO t VALUES (1);",
    ]);
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("constraint"), "constraint error expected: {err}");
}

#[test]
fn unopenable_database_exits_nonzero() {
    let output = run(&["/nonexistent_dir/sqltutor.db", "-c", "SELECT 1"]);
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("Failed to open database"), "open failure expected: {err}");
}
