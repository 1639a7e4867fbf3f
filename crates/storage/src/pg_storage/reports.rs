use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use trainer_admin_core::{CategoryCounts, DataCategory, UserGoal, FEEDBACK_TABLE, MAX_QUERY_LIMIT};

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::TrainerDataStore;
use crate::types::FeedbackEntry;

fn row_to_feedback(row: &sqlx::postgres::PgRow) -> Result<FeedbackEntry, StorageError> {
    Ok(FeedbackEntry {
        id: row.try_get("id")?,
        user_goal: row.try_get("user_goal")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created_at: row.try_get::<Option<DateTime<Utc>>, _>("created_at")?,
    })
}

/// Errors the server raised for one table's query (missing table, no
/// privilege). Pool and transport failures are not among them.
fn is_per_table_failure(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(_))
}

#[async_trait]
impl TrainerDataStore for PgStorage {
    async fn count_by_category(&self, trainer_id: &str) -> Result<CategoryCounts, StorageError> {
        let mut counts = CategoryCounts::new();
        for category in DataCategory::ALL {
            let sql = format!("SELECT COUNT(*) FROM {} WHERE trainer_id = $1", category.table());
            let result: Result<i64, sqlx::Error> =
                sqlx::query_scalar(&sql).bind(trainer_id).fetch_one(&self.pool).await;
            let count = match result {
                Ok(n) => u64::try_from(n).unwrap_or(0),
                Err(e) if is_per_table_failure(&e) => {
                    tracing::warn!(table = category.table(), "count failed, reporting 0: {e}");
                    0
                },
                Err(e) => return Err(e.into()),
            };
            counts.set(category, count);
        }
        Ok(counts)
    }

    async fn list_feedback(
        &self,
        trainer_id: &str,
        goal: Option<&UserGoal>,
        limit: usize,
    ) -> Result<Vec<FeedbackEntry>, StorageError> {
        // Column types on the feedback table are owned elsewhere; cast to what we decode.
        let sql = format!(
            r#"
            SELECT id::bigint AS id,
                   user_goal::text AS user_goal,
                   title::text AS title,
                   content::text AS content,
                   created_at::timestamptz AS created_at
            FROM {FEEDBACK_TABLE}
            WHERE trainer_id = $1 AND ($2::text IS NULL OR user_goal = $2)
            ORDER BY created_at DESC NULLS LAST, id DESC
            LIMIT $3
            "#
        );
        let limit = i64::try_from(limit.min(MAX_QUERY_LIMIT)).unwrap_or(i64::MAX);
        let rows = sqlx::query(&sql)
            .bind(trainer_id)
            .bind(goal.map(|g| g.as_str().to_owned()))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_feedback).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failures_are_not_counted_as_zero() {
        assert!(!is_per_table_failure(&sqlx::Error::PoolTimedOut));
        assert!(!is_per_table_failure(&sqlx::Error::PoolClosed));
        assert!(!is_per_table_failure(&sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset by peer",
        ))));
    }
}
