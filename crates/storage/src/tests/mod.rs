//! Test utilities and module declarations for storage tests.

use crate::Storage;
use rusqlite::params;
use tempfile::TempDir;
use trainer_admin_core::{DataCategory, FEEDBACK_TABLE};

/// Feedback table as it exists before the user-goal migration.
const FEEDBACK_DDL: &str = "
    CREATE TABLE data_trainer_feedback (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        trainer_id TEXT NOT NULL,
        title TEXT,
        content TEXT,
        category TEXT,
        keywords TEXT,
        language TEXT DEFAULT 'ko',
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )";

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

/// Storage with every category table present and the feedback table unmigrated.
#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_seeded_storage() -> (Storage, TempDir) {
    let (storage, dir) = create_test_storage();
    storage
        .with_conn(|conn| {
            conn.execute_batch(FEEDBACK_DDL)?;
            for category in DataCategory::ALL {
                if category == DataCategory::Feedback {
                    continue;
                }
                conn.execute_batch(&format!(
                    "CREATE TABLE {} (
                        id INTEGER PRIMARY KEY AUTOINCREMENT,
                        trainer_id TEXT NOT NULL,
                        content TEXT,
                        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                    )",
                    category.table()
                ))?;
            }
            Ok(())
        })
        .unwrap();
    (storage, dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn insert_feedback(storage: &Storage, trainer_id: &str, title: &str, created_at: &str) -> i64 {
    storage
        .with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {FEEDBACK_TABLE} (trainer_id, title, content, created_at)
                     VALUES (?1, ?2, 'body', ?3)"
                ),
                params![trainer_id, title, created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn insert_rows(storage: &Storage, category: DataCategory, trainer_id: &str, n: usize) {
    storage
        .with_conn(|conn| {
            for _ in 0..n {
                if category == DataCategory::Feedback {
                    conn.execute(
                        &format!("INSERT INTO {FEEDBACK_TABLE} (trainer_id, title) VALUES (?1, 't')"),
                        [trainer_id],
                    )?;
                } else {
                    conn.execute(
                        &format!("INSERT INTO {} (trainer_id, content) VALUES (?1, 'c')", category.table()),
                        [trainer_id],
                    )?;
                }
            }
            Ok(())
        })
        .unwrap();
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn user_goals(storage: &Storage) -> Vec<Option<String>> {
    storage
        .with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT user_goal FROM {FEEDBACK_TABLE} ORDER BY id"))?;
            let rows = stmt.query_map([], |row| row.get::<_, Option<String>>(0))?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .unwrap()
}

mod migration_tests;
