use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::params;
use rusqlite::types::{Type, ValueRef};
use trainer_admin_core::{CategoryCounts, DataCategory, UserGoal, FEEDBACK_TABLE, MAX_QUERY_LIMIT};

use super::{get_conn, Storage};
use crate::error::StorageError;
use crate::types::FeedbackEntry;

const CREATED_AT_IDX: usize = 4;

/// Accepts RFC 3339, SQLite's `CURRENT_TIMESTAMP` format and Unix seconds.
fn parse_sqlite_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok().map(|n| n.and_utc())
        })
        .or_else(|| raw.parse::<i64>().ok().and_then(|secs| DateTime::from_timestamp(secs, 0)))
}

/// `created_at` may hold text or a number depending on the declared column type.
fn created_at_from(value: ValueRef<'_>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    match value {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(secs) => Ok(DateTime::from_timestamp(secs, 0)),
        ValueRef::Real(secs) => Ok(DateTime::from_timestamp(secs as i64, 0)),
        ValueRef::Text(raw) => Ok(std::str::from_utf8(raw).ok().and_then(parse_sqlite_timestamp)),
        ValueRef::Blob(_) => Err(rusqlite::Error::InvalidColumnType(
            CREATED_AT_IDX,
            "created_at".to_owned(),
            Type::Blob,
        )),
    }
}

impl Storage {
    pub fn count_by_category(&self, trainer_id: &str) -> Result<CategoryCounts, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut counts = CategoryCounts::new();
        for category in DataCategory::ALL {
            let sql = format!("SELECT COUNT(*) FROM {} WHERE trainer_id = ?1", category.table());
            let count = match conn.query_row(&sql, [trainer_id], |row| row.get::<_, i64>(0)) {
                Ok(n) => n.max(0) as u64,
                Err(e) => {
                    tracing::warn!(table = category.table(), "count failed, reporting 0: {e}");
                    0
                },
            };
            counts.set(category, count);
        }
        Ok(counts)
    }

    pub fn list_feedback(
        &self,
        trainer_id: &str,
        goal: Option<&UserGoal>,
        limit: usize,
    ) -> Result<Vec<FeedbackEntry>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let sql = format!(
            "SELECT id, user_goal, title, content, created_at FROM {FEEDBACK_TABLE}
             WHERE trainer_id = ?1 AND (?2 IS NULL OR user_goal = ?2)
             ORDER BY created_at DESC, id DESC
             LIMIT ?3"
        );
        let mut stmt = conn.prepare(&sql)?;
        let limit = limit.min(MAX_QUERY_LIMIT) as i64;
        let rows = stmt.query_map(params![trainer_id, goal.map(UserGoal::as_str), limit], |row| {
            Ok(FeedbackEntry {
                id: row.get(0)?,
                user_goal: row.get(1)?,
                title: row.get(2)?,
                content: row.get(3)?,
                created_at: created_at_from(row.get_ref(CREATED_AT_IDX)?)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_timestamp_formats() {
        assert!(parse_sqlite_timestamp("2025-01-02 03:04:05").is_some());
        assert!(parse_sqlite_timestamp("2025-01-02T03:04:05Z").is_some());
        assert_eq!(parse_sqlite_timestamp("1700000000"), DateTime::from_timestamp(1_700_000_000, 0));
        assert!(parse_sqlite_timestamp("yesterday").is_none());
    }
}
