//! `SQLite` storage implementation
//!
//! Synchronous methods over an r2d2 pool; `sqlite_async` wraps them for the
//! async traits.

// SQLite uses i64 for counts, Rust uses u64 - safe conversions within DB context
#![allow(
    clippy::as_conversions,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    reason = "SQLite i64 <-> Rust u64 conversions are safe within DB row counts"
)]

mod reports;
mod schema;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use trainer_admin_core::env_parse_with_default;

use crate::error::StorageError;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

fn db_pool_size() -> u32 {
    env_parse_with_default("TRAINER_ADMIN_DB_POOL_SIZE", 4)
}

impl Storage {
    /// Open a `SQLite` database. Trainer tables are owned by the application
    /// that writes them, so nothing is created here.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

        let pool_size = db_pool_size();
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        tracing::info!(pool_size = pool_size, path = %db_path.display(), "Storage initialized");

        Ok(Self { pool })
    }

    /// Run `f` against a pooled connection.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let conn = get_conn(&self.pool)?;
        f(&conn)
    }
}
