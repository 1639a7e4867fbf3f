use super::*;
use crate::error::StorageError;
use crate::traits::SchemaStore;
use trainer_admin_core::{USER_GOAL_COLUMN, USER_GOAL_INDEX, USER_GOAL_SENTINEL};

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn backfills_existing_rows_with_sentinel() {
    let (storage, _dir) = create_seeded_storage();
    for i in 0..3 {
        insert_feedback(&storage, "tr_001", &format!("fb {i}"), "2025-01-01 00:00:00");
    }

    let report = storage.apply_user_goal_migration().unwrap();
    assert!(report.column_added);
    assert_eq!(report.rows_backfilled, 3);
    assert!(report.index_created);
    assert_eq!(report.column, USER_GOAL_COLUMN);
    assert_eq!(report.index, USER_GOAL_INDEX);

    let goals = user_goals(&storage);
    assert_eq!(goals, vec![Some(USER_GOAL_SENTINEL.to_owned()); 3]);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn second_run_changes_nothing() {
    let (storage, _dir) = create_seeded_storage();
    for i in 0..3 {
        insert_feedback(&storage, "tr_001", &format!("fb {i}"), "2025-01-01 00:00:00");
    }

    storage.apply_user_goal_migration().unwrap();
    let schema_after_first = describe_schema(&storage);

    let second = storage.apply_user_goal_migration().unwrap();
    assert!(second.is_noop(), "rerun should be a no-op: {second:?}");
    assert_eq!(describe_schema(&storage), schema_after_first);
    assert_eq!(user_goals(&storage).len(), 3);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn backfill_never_overwrites_existing_values() {
    let (storage, _dir) = create_seeded_storage();
    insert_feedback(&storage, "tr_001", "old", "2025-01-01 00:00:00");
    storage.apply_user_goal_migration().unwrap();

    storage
        .with_conn(|conn| {
            conn.execute(
                &format!("INSERT INTO {FEEDBACK_TABLE} (trainer_id, title, user_goal) VALUES ('tr_001', 'new', 'muscle_gain')"),
                [],
            )?;
            conn.execute(&format!("INSERT INTO {FEEDBACK_TABLE} (trainer_id, title) VALUES ('tr_001', 'later')"), [])?;
            Ok(())
        })
        .unwrap();

    let report = storage.apply_user_goal_migration().unwrap();
    assert_eq!(report.rows_backfilled, 1, "only the null row is backfilled");
    assert_eq!(
        user_goals(&storage),
        vec![
            Some(USER_GOAL_SENTINEL.to_owned()),
            Some("muscle_gain".to_owned()),
            Some(USER_GOAL_SENTINEL.to_owned()),
        ]
    );
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn new_rows_stay_null_without_rerun() {
    let (storage, _dir) = create_seeded_storage();
    storage.apply_user_goal_migration().unwrap();
    insert_feedback(&storage, "tr_001", "after", "2025-02-01 00:00:00");

    assert_eq!(user_goals(&storage), vec![None]);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn verification_describes_one_nullable_column() {
    let (storage, _dir) = create_seeded_storage();
    assert_eq!(storage.describe_user_goal_column().unwrap(), None);

    storage.apply_user_goal_migration().unwrap();
    let column = storage.describe_user_goal_column().unwrap().unwrap();
    assert_eq!(column.column_name, USER_GOAL_COLUMN);
    assert_eq!(column.data_type, "VARCHAR(50)");
    assert_eq!(column.max_length, Some(50));
    assert!(column.is_nullable);
}

#[test]
fn missing_table_is_reported() {
    let (storage, _dir) = create_test_storage();
    let err = storage.apply_user_goal_migration().unwrap_err();
    assert!(
        matches!(&err, StorageError::MissingTable { table } if table == FEEDBACK_TABLE),
        "unexpected error: {err}"
    );
    assert!(err.is_precondition());
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn incompatible_existing_column_is_rejected() {
    let (storage, _dir) = create_test_storage();
    storage
        .with_conn(|conn| {
            conn.execute_batch(
                "CREATE TABLE data_trainer_feedback (id INTEGER PRIMARY KEY, trainer_id TEXT, user_goal INTEGER)",
            )?;
            Ok(())
        })
        .unwrap();

    let err = storage.apply_user_goal_migration().unwrap_err();
    assert!(
        matches!(&err, StorageError::ColumnTypeConflict { found, .. } if found == "INTEGER"),
        "unexpected error: {err}"
    );
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn existing_text_column_is_adopted() {
    let (storage, _dir) = create_test_storage();
    storage
        .with_conn(|conn| {
            conn.execute_batch(
                "CREATE TABLE data_trainer_feedback (id INTEGER PRIMARY KEY, trainer_id TEXT, user_goal TEXT);
                 INSERT INTO data_trainer_feedback (trainer_id, user_goal) VALUES ('tr_001', NULL);",
            )?;
            Ok(())
        })
        .unwrap();

    let report = storage.apply_user_goal_migration().unwrap();
    assert!(!report.column_added);
    assert_eq!(report.rows_backfilled, 1);
    assert!(report.index_created);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn read_only_connection_reports_permission_denied() {
    let (storage, dir) = create_seeded_storage();
    insert_feedback(&storage, "tr_001", "fb", "2025-01-01 00:00:00");

    let conn = rusqlite::Connection::open(dir.path().join("test.db")).unwrap();
    conn.execute_batch("PRAGMA query_only = ON").unwrap();

    let err = crate::migrations::run_user_goal_migration(&conn).unwrap_err();
    assert!(matches!(err, StorageError::PermissionDenied(_)), "unexpected error: {err}");
    assert!(err.is_precondition());
    assert!(storage.describe_user_goal_column().unwrap().is_none(), "nothing was changed");
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn async_trait_matches_sync_path() {
    let (storage, _dir) = create_seeded_storage();
    insert_feedback(&storage, "tr_001", "fb", "2025-01-01 00:00:00");

    let report = SchemaStore::apply_user_goal_migration(&storage).await.unwrap();
    assert_eq!(report.rows_backfilled, 1);
    let column = SchemaStore::describe_user_goal_column(&storage).await.unwrap();
    assert!(column.is_some());
}

/// Columns and indexes on the feedback table, for before/after comparison.
#[expect(clippy::unwrap_used, reason = "test code")]
fn describe_schema(storage: &Storage) -> (Vec<(String, String)>, Vec<String>) {
    storage
        .with_conn(|conn| {
            let mut cols = conn.prepare("SELECT name, type FROM pragma_table_info(?1)")?;
            let columns = cols
                .query_map([FEEDBACK_TABLE], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            let mut idx = conn.prepare(
                "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = ?1 ORDER BY name",
            )?;
            let indexes = idx
                .query_map([FEEDBACK_TABLE], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok((columns, indexes))
        })
        .unwrap()
}
