use anyhow::Result;
use serde::Serialize;
use trainer_admin_core::{calculate_score, CategoryCounts, ScoreReport, UserGoal};
use trainer_admin_storage::{StorageBackend, TrainerDataStore};

#[derive(Serialize)]
struct StatusOutput<'a> {
    trainer_id: &'a str,
    counts: CategoryCounts,
    #[serde(flatten)]
    score: ScoreReport,
}

pub(crate) async fn run_status(backend: &StorageBackend, trainer_id: &str) -> Result<()> {
    let counts = backend.count_by_category(trainer_id).await?;
    let score = calculate_score(&counts);
    tracing::info!(
        trainer_id,
        total_score = score.total_score,
        tier = %score.tier,
        "Computed trainer status"
    );
    let output = StatusOutput { trainer_id, counts, score };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) async fn run_feedback(
    backend: &StorageBackend,
    trainer_id: &str,
    goal: Option<&str>,
    limit: usize,
) -> Result<()> {
    let goal = goal.map(str::parse::<UserGoal>).transpose()?;
    let entries = backend.list_feedback(trainer_id, goal.as_ref(), limit).await?;
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
