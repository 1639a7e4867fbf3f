//! Async storage traits implemented by every backend.

use async_trait::async_trait;
use trainer_admin_core::{CategoryCounts, UserGoal};

use crate::error::StorageError;
use crate::types::{ColumnDescription, FeedbackEntry, MigrationReport};

/// Schema changes against the externally-owned trainer tables.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// Add `user_goal` to the feedback table, backfill the sentinel into
    /// null rows and index the column. Every step is guarded, so reruns
    /// are safe.
    async fn apply_user_goal_migration(&self) -> Result<MigrationReport, StorageError>;

    /// Describe the `user_goal` column, `None` when it does not exist.
    async fn describe_user_goal_column(&self) -> Result<Option<ColumnDescription>, StorageError>;
}

/// Read-only reports over trainer-authored content.
#[async_trait]
pub trait TrainerDataStore: Send + Sync {
    /// Rows per category for `trainer_id`. Unreadable tables count as 0.
    async fn count_by_category(&self, trainer_id: &str) -> Result<CategoryCounts, StorageError>;

    /// Feedback rows for `trainer_id`, newest first, optionally filtered by goal.
    async fn list_feedback(
        &self,
        trainer_id: &str,
        goal: Option<&UserGoal>,
        limit: usize,
    ) -> Result<Vec<FeedbackEntry>, StorageError>;
}
