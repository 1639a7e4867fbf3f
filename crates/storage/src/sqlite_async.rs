//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use trainer_admin_core::{CategoryCounts, UserGoal};

use crate::error::StorageError;
use crate::traits::{SchemaStore, TrainerDataStore};
use crate::types::{ColumnDescription, FeedbackEntry, MigrationReport};
use crate::Storage;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Join(e.to_string()))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@str arg`      — `.to_owned()` a `&str`, pass as `&arg`
/// - `@opt_ref arg`  — `.cloned()` an `Option<&T>`, pass as `arg.as_ref()`
/// - `@val arg`      — move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture opt_ref $arg:ident) => { let $arg = $arg.cloned(); };
    (@capture val $arg:ident) => { };
    (@pass str $arg:ident) => { &$arg };
    (@pass opt_ref $arg:ident) => { $arg.as_ref() };
    (@pass val $arg:ident) => { $arg };
}

// ── SchemaStore ──────────────────────────────────────────────────

#[async_trait]
impl SchemaStore for Storage {
    async fn apply_user_goal_migration(&self) -> Result<MigrationReport, StorageError> {
        delegate!(self, apply_user_goal_migration)
    }
    async fn describe_user_goal_column(&self) -> Result<Option<ColumnDescription>, StorageError> {
        delegate!(self, describe_user_goal_column)
    }
}

// ── TrainerDataStore ─────────────────────────────────────────────

#[async_trait]
impl TrainerDataStore for Storage {
    async fn count_by_category(&self, trainer_id: &str) -> Result<CategoryCounts, StorageError> {
        delegate!(self, count_by_category, @str trainer_id)
    }
    async fn list_feedback(
        &self,
        trainer_id: &str,
        goal: Option<&UserGoal>,
        limit: usize,
    ) -> Result<Vec<FeedbackEntry>, StorageError> {
        delegate!(self, list_feedback, @str trainer_id, @opt_ref goal, @val limit)
    }
}
