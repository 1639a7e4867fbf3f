//! Shared constants for trainer-admin.
//!
//! Table, column and index names used by the schema migration live here so the
//! Postgres and SQLite backends agree on them.

/// Feedback table that receives the `user_goal` column.
pub const FEEDBACK_TABLE: &str = "data_trainer_feedback";

/// Column added by the user-goal migration.
pub const USER_GOAL_COLUMN: &str = "user_goal";

/// Secondary index over [`USER_GOAL_COLUMN`].
pub const USER_GOAL_INDEX: &str = "idx_data_trainer_feedback_user_goal";

/// Maximum length of a user goal label (`VARCHAR(50)`).
pub const USER_GOAL_MAX_LEN: usize = 50;

/// Declared SQL type of the user goal column.
pub const USER_GOAL_SQL_TYPE: &str = "VARCHAR(50)";

/// Label backfilled into rows that predate the column.
pub const USER_GOAL_SENTINEL: &str = "general";

/// Trainer selected when none is given on the command line.
pub const DEFAULT_TRAINER_ID: &str = "tr_001";

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 4;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default PostgreSQL port when `DB_PORT` is unset.
pub const DEFAULT_PG_PORT: u16 = 5432;

/// Number of shortfall priorities reported.
pub const MAX_PRIORITIES: usize = 5;

/// Priorities ranked at or above this position are urgent.
pub const URGENT_PRIORITY_RANK: usize = 3;

/// Default number of feedback rows listed.
pub const DEFAULT_QUERY_LIMIT: usize = 20;

/// Maximum number of rows for any listing query.
pub const MAX_QUERY_LIMIT: usize = 1000;
