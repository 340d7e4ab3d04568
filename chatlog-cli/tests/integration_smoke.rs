//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

const DB_VARS: [&str; 5] = [
    "CHATLOG_DB_HOST",
    "CHATLOG_DB_PORT",
    "CHATLOG_DB_USER",
    "CHATLOG_DB_PASSWORD",
    "CHATLOG_DB_NAME",
];

fn chatlog() -> Command {
    let mut cmd = Command::cargo_bin("chatlog").unwrap();
    // Point dotenv at a file that does not exist so no local settings leak in
    cmd.env("CHATLOG_ENV_FILE", "/nonexistent/chatlog.env");
    for var in DB_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_serve() {
    chatlog()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help() {
    chatlog()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--legacy-default-session"))
        .stdout(predicate::str::contains("--bind"));
}

#[test]
fn test_serve_without_database_config_fails_fast() {
    chatlog()
        .arg("serve")
        .arg("--bind")
        .arg("127.0.0.1:0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CHATLOG_DB_"));
}

#[test]
fn test_serve_with_unreachable_database_fails_fast() {
    chatlog()
        .arg("serve")
        .arg("--bind")
        .arg("127.0.0.1:0")
        .env("CHATLOG_DB_HOST", "127.0.0.1")
        .env("CHATLOG_DB_PORT", "1")
        .env("CHATLOG_DB_USER", "chatlog")
        .env("CHATLOG_DB_NAME", "chatlog")
        .env("CHATLOG_DB_ACQUIRE_TIMEOUT_SECS", "1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create database pool"));
}
