use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one run of the user-goal migration.
///
/// A second run against the same database reports `column_added == false`,
/// `rows_backfilled == 0` and `index_created == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub table: String,
    pub column: String,
    pub column_added: bool,
    pub rows_backfilled: u64,
    pub index: String,
    pub index_created: bool,
}

impl MigrationReport {
    /// True when the run changed nothing.
    pub fn is_noop(&self) -> bool {
        !self.column_added && self.rows_backfilled == 0 && !self.index_created
    }
}

/// Read-only description of a column, for operator confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub column_name: String,
    pub data_type: String,
    pub max_length: Option<i32>,
    pub is_nullable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: i64,
    /// Stored label as written. `None` only for SQL NULL; an empty string stays empty.
    pub user_goal: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
