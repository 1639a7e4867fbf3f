//! PostgreSQL schema migration for the trainer feedback table.

use sqlx::{PgConnection, PgPool, Row};
use trainer_admin_core::{
    FEEDBACK_TABLE, USER_GOAL_COLUMN, USER_GOAL_INDEX, USER_GOAL_SENTINEL, USER_GOAL_SQL_TYPE,
};

use crate::error::StorageError;
use crate::types::{ColumnDescription, MigrationReport};

/// `information_schema.columns.data_type` values accepted for an existing column.
const TEXT_TYPES: [&str; 3] = ["character varying", "text", "character"];

/// Schema of the table that the unqualified name resolves to through
/// `search_path`, the same lookup the DDL below goes through.
async fn table_schema(conn: &mut PgConnection, table: &str) -> Result<Option<String>, StorageError> {
    let schema: Option<String> = sqlx::query_scalar(
        r#"
        SELECT n.nspname::text
        FROM pg_class c
        JOIN pg_namespace n ON n.oid = c.relnamespace
        WHERE c.oid = to_regclass($1::text)
        "#,
    )
    .bind(table)
    .fetch_optional(conn)
    .await?;
    Ok(schema)
}

async fn column_type(
    conn: &mut PgConnection,
    schema: &str,
    table: &str,
    column: &str,
) -> Result<Option<String>, StorageError> {
    let found: Option<String> = sqlx::query_scalar(
        r#"
        SELECT data_type::text FROM information_schema.columns
        WHERE table_schema = $1 AND table_name = $2 AND column_name = $3
        "#,
    )
    .bind(schema)
    .bind(table)
    .bind(column)
    .fetch_optional(conn)
    .await?;
    Ok(found)
}

async fn index_exists(
    conn: &mut PgConnection,
    schema: &str,
    table: &str,
    index: &str,
) -> Result<bool, StorageError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM pg_indexes
            WHERE schemaname = $1 AND tablename = $2 AND indexname = $3
        )
        "#,
    )
    .bind(schema)
    .bind(table)
    .bind(index)
    .fetch_one(conn)
    .await?;
    Ok(exists)
}

/// Add `user_goal`, backfill the sentinel and index the column.
///
/// Statements run in sequence on a single connection without an enclosing
/// transaction. Each is guarded (`IF NOT EXISTS`, `WHERE ... IS NULL`), so a
/// rerun after a failure is safe.
pub async fn run_user_goal_migration(pool: &PgPool) -> Result<MigrationReport, StorageError> {
    let mut conn = pool.acquire().await?;

    let Some(schema) = table_schema(&mut conn, FEEDBACK_TABLE).await? else {
        return Err(StorageError::MissingTable { table: FEEDBACK_TABLE.to_owned() });
    };

    let existing = column_type(&mut conn, &schema, FEEDBACK_TABLE, USER_GOAL_COLUMN).await?;
    if let Some(found) = &existing {
        if !TEXT_TYPES.contains(&found.as_str()) {
            return Err(StorageError::ColumnTypeConflict {
                table: FEEDBACK_TABLE.to_owned(),
                column: USER_GOAL_COLUMN.to_owned(),
                found: found.clone(),
            });
        }
    }

    let column_added = existing.is_none();
    sqlx::query(&format!(
        "ALTER TABLE {FEEDBACK_TABLE} ADD COLUMN IF NOT EXISTS {USER_GOAL_COLUMN} {USER_GOAL_SQL_TYPE}"
    ))
    .execute(&mut *conn)
    .await?;
    if column_added {
        tracing::info!(schema = %schema, table = FEEDBACK_TABLE, column = USER_GOAL_COLUMN, "Added column");
    } else {
        tracing::debug!(column = USER_GOAL_COLUMN, "Column already present, skipping add");
    }

    let rows_backfilled = sqlx::query(&format!(
        "UPDATE {FEEDBACK_TABLE} SET {USER_GOAL_COLUMN} = $1 WHERE {USER_GOAL_COLUMN} IS NULL"
    ))
    .bind(USER_GOAL_SENTINEL)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    tracing::info!(rows = rows_backfilled, sentinel = USER_GOAL_SENTINEL, "Backfilled user goal");

    let index_created = !index_exists(&mut conn, &schema, FEEDBACK_TABLE, USER_GOAL_INDEX).await?;
    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS {USER_GOAL_INDEX} ON {FEEDBACK_TABLE} ({USER_GOAL_COLUMN})"
    ))
    .execute(&mut *conn)
    .await?;
    if index_created {
        tracing::info!(index = USER_GOAL_INDEX, "Created index");
    } else {
        tracing::debug!(index = USER_GOAL_INDEX, "Index already present, skipping create");
    }

    tracing::info!("PostgreSQL user goal migration completed");
    Ok(MigrationReport {
        table: FEEDBACK_TABLE.to_owned(),
        column: USER_GOAL_COLUMN.to_owned(),
        column_added,
        rows_backfilled,
        index: USER_GOAL_INDEX.to_owned(),
        index_created,
    })
}

/// Verification query: name, declared type and nullability of `user_goal`.
pub async fn describe_user_goal_column(
    pool: &PgPool,
) -> Result<Option<ColumnDescription>, StorageError> {
    let mut conn = pool.acquire().await?;
    let Some(schema) = table_schema(&mut conn, FEEDBACK_TABLE).await? else {
        return Ok(None);
    };

    let row = sqlx::query(
        r#"
        SELECT column_name::text AS column_name,
               data_type::text AS data_type,
               character_maximum_length::int4 AS max_length,
               is_nullable::text AS is_nullable
        FROM information_schema.columns
        WHERE table_schema = $1 AND table_name = $2 AND column_name = $3
        "#,
    )
    .bind(&schema)
    .bind(FEEDBACK_TABLE)
    .bind(USER_GOAL_COLUMN)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(|row| -> Result<ColumnDescription, StorageError> {
        Ok(ColumnDescription {
            column_name: row.try_get("column_name")?,
            data_type: row.try_get("data_type")?,
            max_length: row.try_get("max_length")?,
            is_nullable: row.try_get::<String, _>("is_nullable")? == "YES",
        })
    })
    .transpose()
}
