#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn boltview(config_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("boltview"));
    cmd.env("BOLTVIEW_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_create_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("app.db");

    boltview(temp_dir.path())
        .arg(&db)
        .args(["create-entry", "users", "alice", "admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry saved in users"));

    boltview(temp_dir.path())
        .arg(&db)
        .args(["create-bucket", "sessions"])
        .assert()
        .success();

    boltview(temp_dir.path())
        .arg(&db)
        .arg("list")
        .assert()
        .success()
        .stdout("sessions\nusers\n\talice => admin\n");
}

#[test]
fn test_conflicts_exit_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("app.db");

    boltview(temp_dir.path())
        .arg(&db)
        .args(["create-entry", "users", "alice", "admin"])
        .assert()
        .success();

    boltview(temp_dir.path())
        .arg(&db)
        .args(["create-entry", "users", "alice", "root"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key exists"));

    boltview(temp_dir.path())
        .arg(&db)
        .args(["create-entry", "users", "alice", "root", "--anyway"])
        .assert()
        .success();

    boltview(temp_dir.path())
        .arg(&db)
        .args(["delete-bucket", "users"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("should delete entry first"));
}

#[test]
fn test_apply_from_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("app.db");

    boltview(temp_dir.path())
        .arg(&db)
        .args(["apply", "-"])
        .write_stdin("cfg\n\tport => 8080\n\thost => localhost\n")
        .assert()
        .success();

    boltview(temp_dir.path())
        .arg(&db)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""port": "8080""#))
        .stdout(predicate::str::contains(r#""host": "localhost""#));
}

#[test]
fn test_apply_rejects_malformed_line() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("app.db");

    boltview(temp_dir.path())
        .arg(&db)
        .args(["apply", "-"])
        .write_stdin("cfg\n\tport 8080\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_call_host_functions() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("app.db");

    boltview(temp_dir.path())
        .arg(&db)
        .args(["call", "BoltviewerCreateEntry", "users", "bob", "viewer"])
        .assert()
        .success();

    boltview(temp_dir.path())
        .arg(&db)
        .args(["call", "BoltviewerLoad"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("users\n\tbob => viewer\n"));

    // line 2 is the bob entry
    boltview(temp_dir.path())
        .arg(&db)
        .args(["call", "BoltviewerDeleteBucketEntry", "2"])
        .assert()
        .success();

    boltview(temp_dir.path())
        .arg(&db)
        .args(["call", "BoltviewerDeleteBucket", "users"])
        .assert()
        .success();

    boltview(temp_dir.path())
        .arg(&db)
        .arg("list")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_unknown_function() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("app.db");

    boltview(temp_dir.path())
        .arg(&db)
        .args(["call", "BoltviewerExplode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown function"));
}

#[test]
fn test_config_set_changes_indent() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("app.db");

    boltview(temp_dir.path())
        .args(["config", "indent", "  "])
        .assert()
        .success();

    boltview(temp_dir.path())
        .arg(&db)
        .args(["create-entry", "b", "k", "v"])
        .assert()
        .success();

    boltview(temp_dir.path())
        .arg(&db)
        .assert()
        .success()
        .stdout("b\n  k => v\n");
}

#[test]
fn test_missing_db_argument() {
    let temp_dir = TempDir::new().unwrap();
    boltview(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No store file given"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("app.db");

    boltview(temp_dir.path())
        .arg(&db)
        .args(["-v", "create-bucket", "sessions"])
        .assert()
        .success()
        .stderr(predicate::str::contains("created bucket"));
}
