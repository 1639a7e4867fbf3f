//! Typed error enum for the storage layer.
//!
//! Lets the CLI tell operators which precondition failed (missing table,
//! conflicting column, missing privileges) instead of printing an opaque
//! driver error.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Target table does not resolve through the search path.
    #[error("table {table} does not exist")]
    MissingTable { table: String },

    /// A column with the migrated name exists with a non-text type.
    #[error("column {table}.{column} already exists with incompatible type {found}")]
    ColumnTypeConflict { table: String, column: String, found: String },

    /// Executing role lacks schema-modification or read privileges.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Postgres connection or query failure.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// SQLite query failure.
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    /// Connection pool could not hand out a connection.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(String),
}

impl StorageError {
    /// Whether rerunning after the operator fixes something could succeed.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingTable { .. } | Self::ColumnTypeConflict { .. } | Self::PermissionDenied(_)
        )
    }
}

/// Custom `From<sqlx::Error>` — NOT blanket `#[from]`.
///
/// - SQLSTATE 42501 (insufficient_privilege) → `PermissionDenied`
/// - SQLSTATE 42P01 (undefined_table) → `MissingTable`
/// - Everything else → `Database`
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "42501") => {
                Self::PermissionDenied(db_err.message().to_owned())
            },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "42P01") => {
                Self::MissingTable {
                    table: db_err.table().unwrap_or("unknown").to_owned(),
                }
            },
            _ => Self::Database(err),
        }
    }
}

/// `SQLITE_AUTH` and `SQLITE_READONLY` surface as `PermissionDenied`.
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, msg)
                if matches!(
                    code.code,
                    rusqlite::ErrorCode::AuthorizationForStatementDenied
                        | rusqlite::ErrorCode::ReadOnly
                ) =>
            {
                Self::PermissionDenied(msg.clone().unwrap_or_else(|| code.to_string()))
            },
            _ => Self::Sqlite(err),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        Self::Pool(err.to_string())
    }
}
