//! PostgreSQL storage backend using sqlx.

mod reports;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use trainer_admin_core::{
    DbConfig, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};

use crate::error::StorageError;
use crate::pg_migrations;
use crate::traits::SchemaStore;
use crate::types::{ColumnDescription, MigrationReport};

/// Driver options for `config`. Discrete parts go to the driver unencoded.
pub fn connect_options(config: &DbConfig) -> Result<PgConnectOptions, StorageError> {
    match config {
        DbConfig::Url(url) => Ok(url.parse::<PgConnectOptions>()?),
        DbConfig::Parts { host, port, database, user, password } => {
            let options =
                PgConnectOptions::new().host(host).port(*port).database(database).username(user);
            if password.is_empty() {
                Ok(options)
            } else {
                Ok(options.password(password))
            }
        },
    }
}

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect without touching the schema; migrations are applied explicitly.
    pub async fn new(config: &DbConfig) -> Result<Self, StorageError> {
        Self::connect(connect_options(config)?).await
    }

    pub async fn connect(options: PgConnectOptions) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect_with(options)
            .await?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

#[async_trait]
impl SchemaStore for PgStorage {
    async fn apply_user_goal_migration(&self) -> Result<MigrationReport, StorageError> {
        pg_migrations::run_user_goal_migration(&self.pool).await
    }

    async fn describe_user_goal_column(&self) -> Result<Option<ColumnDescription>, StorageError> {
        pg_migrations::describe_user_goal_column(&self.pool).await
    }
}
