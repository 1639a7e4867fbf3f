use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn seed_feedback_table(db: &Path, rows: usize) {
    let conn = rusqlite::Connection::open(db).unwrap();
    conn.execute_batch(
        "CREATE TABLE data_trainer_feedback (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            trainer_id TEXT NOT NULL,
            title TEXT,
            content TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .unwrap();
    for i in 0..rows {
        conn.execute(
            "INSERT INTO data_trainer_feedback (trainer_id, title) VALUES ('tr_001', ?1)",
            [format!("fb {i}")],
        )
        .unwrap();
    }
}

fn trainer_admin(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("trainer-admin").unwrap();
    cmd.arg("--sqlite").arg(db);
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("trainer-admin").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema migration and data status"));
}

#[test]
fn test_cli_status_help() {
    let mut cmd = Command::cargo_bin("trainer-admin").unwrap();
    cmd.arg("status").arg("--help").assert().success().stdout(predicate::str::contains("trainer"));
}

#[test]
fn test_migrate_then_rerun() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("trainer.db");
    seed_feedback_table(&db, 3);

    trainer_admin(&db)
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rows_backfilled\": 3"))
        .stdout(predicate::str::contains("\"column_added\": true"));

    trainer_admin(&db)
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rows_backfilled\": 0"))
        .stdout(predicate::str::contains("\"index_created\": false"));
}

#[test]
fn test_migrate_without_table_fails() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("empty.db");

    trainer_admin(&db)
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("data_trainer_feedback does not exist"));
}

#[test]
fn test_verify_requires_migration() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("trainer.db");
    seed_feedback_table(&db, 1);

    trainer_admin(&db)
        .arg("verify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("run `migrate` first"));

    trainer_admin(&db).arg("migrate").assert().success();

    trainer_admin(&db)
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"column_name\": \"user_goal\""))
        .stdout(predicate::str::contains("\"is_nullable\": true"));
}

#[test]
fn test_status_reports_tier() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("trainer.db");
    seed_feedback_table(&db, 2);

    trainer_admin(&db)
        .args(["status", "--trainer", "tr_001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tier\": \"unranked\""))
        .stdout(predicate::str::contains("\"feedback\": 2"));
}

#[test]
fn test_feedback_rejects_overlong_goal() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("trainer.db");
    seed_feedback_table(&db, 1);
    let long_goal = "x".repeat(51);

    trainer_admin(&db)
        .args(["feedback", "--goal", long_goal.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds 50 characters"));
}
