use super::{get_conn, Storage};
use crate::error::StorageError;
use crate::migrations;
use crate::types::{ColumnDescription, MigrationReport};

impl Storage {
    pub fn apply_user_goal_migration(&self) -> Result<MigrationReport, StorageError> {
        let conn = get_conn(&self.pool)?;
        migrations::run_user_goal_migration(&conn)
    }

    pub fn describe_user_goal_column(&self) -> Result<Option<ColumnDescription>, StorageError> {
        let conn = get_conn(&self.pool)?;
        migrations::describe_user_goal_column(&conn)
    }
}
