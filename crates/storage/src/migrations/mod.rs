#![allow(
    clippy::redundant_pub_crate,
    reason = "migrations module is private, pub(crate) is intentional"
)]

mod column_helpers;

use column_helpers::{
    add_column_if_not_exists, column_type, declared_length, index_exists, is_text_type,
    table_exists,
};
use rusqlite::Connection;
use trainer_admin_core::{
    FEEDBACK_TABLE, USER_GOAL_COLUMN, USER_GOAL_INDEX, USER_GOAL_SENTINEL, USER_GOAL_SQL_TYPE,
};

use crate::error::StorageError;
use crate::types::{ColumnDescription, MigrationReport};

/// Apply the user-goal migration to a SQLite database.
///
/// Steps run in order on one connection with no enclosing transaction; each
/// one is guarded so a rerun after a failure picks up where it stopped.
pub(crate) fn run_user_goal_migration(conn: &Connection) -> Result<MigrationReport, StorageError> {
    if !table_exists(conn, FEEDBACK_TABLE)? {
        return Err(StorageError::MissingTable { table: FEEDBACK_TABLE.to_owned() });
    }

    if let Some(found) = column_type(conn, FEEDBACK_TABLE, USER_GOAL_COLUMN)? {
        if !is_text_type(&found) {
            return Err(StorageError::ColumnTypeConflict {
                table: FEEDBACK_TABLE.to_owned(),
                column: USER_GOAL_COLUMN.to_owned(),
                found,
            });
        }
    }

    let column_added =
        add_column_if_not_exists(conn, FEEDBACK_TABLE, USER_GOAL_COLUMN, USER_GOAL_SQL_TYPE)?;
    if column_added {
        tracing::info!(table = FEEDBACK_TABLE, column = USER_GOAL_COLUMN, "Added column");
    } else {
        tracing::debug!(column = USER_GOAL_COLUMN, "Column already present, skipping add");
    }

    let backfill = format!(
        "UPDATE {FEEDBACK_TABLE} SET {USER_GOAL_COLUMN} = ?1 WHERE {USER_GOAL_COLUMN} IS NULL"
    );
    let rows_backfilled = conn.execute(&backfill, [USER_GOAL_SENTINEL])?;
    tracing::info!(rows = rows_backfilled, sentinel = USER_GOAL_SENTINEL, "Backfilled user goal");

    let index_created = !index_exists(conn, USER_GOAL_INDEX)?;
    conn.execute(
        &format!(
            "CREATE INDEX IF NOT EXISTS {USER_GOAL_INDEX} ON {FEEDBACK_TABLE} ({USER_GOAL_COLUMN})"
        ),
        [],
    )?;
    if index_created {
        tracing::info!(index = USER_GOAL_INDEX, "Created index");
    } else {
        tracing::debug!(index = USER_GOAL_INDEX, "Index already present, skipping create");
    }

    Ok(MigrationReport {
        table: FEEDBACK_TABLE.to_owned(),
        column: USER_GOAL_COLUMN.to_owned(),
        column_added,
        rows_backfilled: u64::try_from(rows_backfilled).unwrap_or(u64::MAX),
        index: USER_GOAL_INDEX.to_owned(),
        index_created,
    })
}

pub(crate) fn describe_user_goal_column(
    conn: &Connection,
) -> Result<Option<ColumnDescription>, StorageError> {
    let row = conn.query_row(
        "SELECT name, type, \"notnull\" FROM pragma_table_info(?1) WHERE name = ?2",
        [FEEDBACK_TABLE, USER_GOAL_COLUMN],
        |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, bool>(2)?))
        },
    );

    match row {
        Ok((column_name, data_type, not_null)) => Ok(Some(ColumnDescription {
            max_length: declared_length(&data_type),
            column_name,
            data_type,
            is_nullable: !not_null,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
