//! User-goal schema migration and its verification.
//!
//! Safe to run repeatedly: the column, backfill and index steps are each
//! guarded, so a rerun after fixing a failed precondition finishes the job.

use anyhow::{bail, Result};
use trainer_admin_core::{FEEDBACK_TABLE, USER_GOAL_COLUMN};
use trainer_admin_storage::{SchemaStore, StorageBackend};

pub(crate) async fn run_migrate(backend: &StorageBackend) -> Result<()> {
    let report = match backend.apply_user_goal_migration().await {
        Ok(report) => report,
        Err(err) if err.is_precondition() => {
            tracing::error!("Migration precondition failed: {err}");
            bail!("{err}; fix the precondition and rerun, completed steps are skipped");
        },
        Err(err) => return Err(err.into()),
    };

    if report.is_noop() {
        tracing::info!("Schema already up to date");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) async fn run_verify(backend: &StorageBackend) -> Result<()> {
    match backend.describe_user_goal_column().await? {
        Some(column) => {
            println!("{}", serde_json::to_string_pretty(&column)?);
            Ok(())
        },
        None => bail!("column {FEEDBACK_TABLE}.{USER_GOAL_COLUMN} does not exist; run `migrate` first"),
    }
}
