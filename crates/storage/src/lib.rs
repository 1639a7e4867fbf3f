//! Storage layer for trainer-admin
//!
//! Applies the user-goal schema migration and reads trainer data counts.
//! PostgreSQL is the production target; SQLite backs local runs and tests.

mod backend;
pub mod error;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
pub mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;
mod types;

pub use backend::StorageBackend;
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use traits::{SchemaStore, TrainerDataStore};
pub use types::{ColumnDescription, FeedbackEntry, MigrationReport};
