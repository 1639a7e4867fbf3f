//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use trainer_admin_core::{CategoryCounts, UserGoal};

use crate::error::StorageError;
use crate::traits::{SchemaStore, TrainerDataStore};
use crate::types::{ColumnDescription, FeedbackEntry, MigrationReport};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::Storage::new(db_path)?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(config: &trainer_admin_core::DbConfig) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(config).await?))
    }

    pub const fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── SchemaStore ──────────────────────────────────────────────────

#[async_trait]
impl SchemaStore for StorageBackend {
    async fn apply_user_goal_migration(&self) -> Result<MigrationReport, StorageError> {
        dispatch!(self, SchemaStore, apply_user_goal_migration())
    }

    async fn describe_user_goal_column(&self) -> Result<Option<ColumnDescription>, StorageError> {
        dispatch!(self, SchemaStore, describe_user_goal_column())
    }
}

// ── TrainerDataStore ─────────────────────────────────────────────

#[async_trait]
impl TrainerDataStore for StorageBackend {
    async fn count_by_category(&self, trainer_id: &str) -> Result<CategoryCounts, StorageError> {
        dispatch!(self, TrainerDataStore, count_by_category(trainer_id))
    }

    async fn list_feedback(
        &self,
        trainer_id: &str,
        goal: Option<&UserGoal>,
        limit: usize,
    ) -> Result<Vec<FeedbackEntry>, StorageError> {
        dispatch!(self, TrainerDataStore, list_feedback(trainer_id, goal, limit))
    }
}
