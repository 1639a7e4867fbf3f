mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use trainer_admin_core::{DbConfig, DEFAULT_QUERY_LIMIT, DEFAULT_TRAINER_ID};
use trainer_admin_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "trainer-admin")]
#[command(about = "Schema migration and data status for the trainer database", long_about = None)]
struct Cli {
    /// Use a SQLite database file instead of PostgreSQL
    #[arg(long, global = true, value_name = "PATH")]
    sqlite: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add and backfill the user_goal column on the feedback table
    Migrate,
    /// Describe the user_goal column; fails when it is missing
    Verify,
    /// Data counts, score, tier and priorities for a trainer
    Status {
        #[arg(short, long, default_value = DEFAULT_TRAINER_ID)]
        trainer: String,
    },
    /// List a trainer's feedback, optionally filtered by user goal
    Feedback {
        #[arg(short, long, default_value = DEFAULT_TRAINER_ID)]
        trainer: String,
        #[arg(short, long)]
        goal: Option<String>,
        #[arg(short, long, default_value_t = DEFAULT_QUERY_LIMIT)]
        limit: usize,
    },
}

/// SQLite when a path is given, otherwise PostgreSQL from the environment.
pub(crate) async fn open_backend(sqlite: Option<&Path>) -> Result<StorageBackend> {
    if let Some(path) = sqlite {
        return Ok(StorageBackend::new_sqlite(path)?);
    }
    let config = DbConfig::from_env()?;
    Ok(StorageBackend::new_postgres(&config).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let backend = open_backend(cli.sqlite.as_deref()).await?;
    tracing::debug!(backend = backend.name(), "Storage backend selected");

    match cli.command {
        Commands::Migrate => commands::migrate::run_migrate(&backend).await,
        Commands::Verify => commands::migrate::run_verify(&backend).await,
        Commands::Status { trainer } => commands::report::run_status(&backend, &trainer).await,
        Commands::Feedback { trainer, goal, limit } => {
            commands::report::run_feedback(&backend, &trainer, goal.as_deref(), limit).await
        },
    }
}
