//! CLI integration tests for littlelemon
//!
//! Tests the littlelemon CLI commands end-to-end using assert_cmd. None of
//! these require a MySQL server; database-touching commands are exercised
//! against an unreachable address and asserted to fail cleanly.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command with an isolated config directory
fn littlelemon_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("littlelemon").unwrap();
    cmd.env("LITTLELEMON_CONFIG_DIR", config_dir.path());
    cmd.env_remove("LITTLELEMON_DB_PASSWORD");
    cmd
}

#[test]
fn test_config_list_shows_defaults() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("database.host = 127.0.0.1"))
        .stdout(predicate::str::contains("database.port = 3306"))
        .stdout(predicate::str::contains("database.database = little_lemon_db"));
}

#[test]
fn test_config_set_and_get_roundtrip() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["config", "set", "database.host", "db.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set database.host = db.example.com"));

    littlelemon_cmd(&temp_dir)
        .args(["config", "get", "database.host"])
        .assert()
        .success()
        .stdout(predicate::str::contains("db.example.com"));
}

#[test]
fn test_config_set_rejects_password() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["config", "set", "database.password", "hunter2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LITTLELEMON_DB_PASSWORD"));
}

#[test]
fn test_config_set_rejects_invalid_port() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["config", "set", "database.port", "0"])
        .assert()
        .failure();
}

#[test]
fn test_config_set_rejects_unsafe_database_name() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["config", "set", "database.database", "bad name;"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid database name"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["config", "get", "no.such.key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_config_path_points_into_config_dir() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_reset_restores_defaults() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["config", "set", "database.host", "db.example.com"])
        .assert()
        .success();

    littlelemon_cmd(&temp_dir)
        .args(["config", "reset"])
        .assert()
        .success();

    littlelemon_cmd(&temp_dir)
        .args(["config", "get", "database.host"])
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1"));
}

#[test]
fn test_status_fails_with_nonzero_exit_when_unreachable() {
    let temp_dir = TempDir::new().unwrap();

    // Port 1 on localhost is refused immediately
    littlelemon_cmd(&temp_dir)
        .args(["config", "set", "database.port", "1"])
        .assert()
        .success();

    littlelemon_cmd(&temp_dir)
        .args(["status"])
        .assert()
        .failure();
}

#[test]
fn test_setup_fails_with_nonzero_exit_when_unreachable() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["config", "set", "database.port", "1"])
        .assert()
        .success();

    littlelemon_cmd(&temp_dir)
        .args(["setup"])
        .assert()
        .failure();
}

#[test]
fn test_doctor_reports_even_when_database_unreachable() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["config", "set", "database.port", "1"])
        .assert()
        .success();

    // Doctor is a report, not a probe that aborts: it exits 0 and lists issues
    littlelemon_cmd(&temp_dir)
        .args(["doctor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Little Lemon Health Check"))
        .stdout(predicate::str::contains("Some checks failed"));
}

#[test]
fn test_quiet_mode_suppresses_chatter() {
    let temp_dir = TempDir::new().unwrap();

    littlelemon_cmd(&temp_dir)
        .args(["--quiet", "config", "set", "database.host", "10.0.0.5"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
