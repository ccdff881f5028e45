//! Integration tests for the wayfinder CLI
//!
//! These tests avoid the LLM backend: they exercise store management and
//! input validation, and point the one networked test at a dead port.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wayfinder_cmd(db_dir: &TempDir) -> Command {
    let db_path = db_dir.path().join("plans.sqlite");
    let mut cmd = Command::cargo_bin("wayfinder").unwrap();
    cmd.env("WAYFINDER_DB", db_path.to_str().unwrap());
    cmd
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("wayfinder").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("reset"));
}

#[test]
fn status_reports_uninitialized_cache() {
    let db_dir = TempDir::new().unwrap();

    let mut cmd = wayfinder_cmd(&db_dir);
    cmd.arg("status");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("not initialized"));
}

#[test]
fn reset_initializes_an_empty_cache() {
    let db_dir = TempDir::new().unwrap();

    let mut reset_cmd = wayfinder_cmd(&db_dir);
    reset_cmd.arg("reset");
    reset_cmd.assert().success();

    let mut status_cmd = wayfinder_cmd(&db_dir);
    status_cmd.arg("status");
    status_cmd
        .assert()
        .success()
        .stdout(predicate::str::contains("Plans:       0"));
}

#[test]
fn reset_twice_still_leaves_an_empty_cache() {
    let db_dir = TempDir::new().unwrap();

    for _ in 0..2 {
        let mut cmd = wayfinder_cmd(&db_dir);
        cmd.arg("reset");
        cmd.assert().success();
    }

    let mut status_cmd = wayfinder_cmd(&db_dir);
    status_cmd.arg("status");
    status_cmd
        .assert()
        .success()
        .stdout(predicate::str::contains("Plans:       0"));
}

#[test]
fn status_supports_json_output() {
    let db_dir = TempDir::new().unwrap();

    let mut reset_cmd = wayfinder_cmd(&db_dir);
    reset_cmd.arg("reset");
    reset_cmd.assert().success();

    let mut cmd = wayfinder_cmd(&db_dir);
    cmd.arg("--format").arg("json").arg("status");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"plans\": 0"));
}

#[test]
fn plan_rejects_malformed_query() {
    let db_dir = TempDir::new().unwrap();

    let mut cmd = wayfinder_cmd(&db_dir);
    cmd.arg("plan").arg("Paris");

    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("days in"));
}

#[test]
fn plan_fails_cleanly_without_a_backend() {
    let db_dir = TempDir::new().unwrap();

    let mut cmd = wayfinder_cmd(&db_dir);
    // Discard port: connection refused before any generation happens
    cmd.env("WAYFINDER_LLM_URL", "http://127.0.0.1:9")
        .arg("plan")
        .arg("5")
        .arg("days")
        .arg("in")
        .arg("Paris");

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Embedding failed"));
}
