//! Player CLI: import local video files and inspect their stored copies.
//!
//! Configuration comes from the environment (see `player_core::Config`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use player_cli::{build_synchronizer, import_file, init_tracing, report};
use player_core::{AppError, Config};
use serde::Serialize;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "player", about = "Player video handle CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a local video file into a new session and copy it into storage
    Import {
        /// Path to the video file
        file: std::path::PathBuf,
        /// Name of the session to create
        #[arg(long, default_value = "default")]
        session: String,
        /// Start without read permission and request it before copying
        #[arg(long)]
        no_grant: bool,
    },
    /// Show the stored copy recorded for a video (requires HANDLE_DB_PATH)
    Stored {
        /// Video UUID
        id: Uuid,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.is_production());
    tracing::info!(
        environment = %config.environment,
        is_production = config.is_production(),
        storage_backend = %config.storage_backend(),
        "Configuration loaded"
    );
    config.validate()?;
    let sync = build_synchronizer(&config).await?;

    match cli.command {
        Commands::Import {
            file,
            session,
            no_grant,
        } => {
            let response = import_file(&sync, &file, &session, !no_grant).await?;
            print_json(&response)?;
        }
        Commands::Stored { id } => {
            if config.handle_db_path().is_none() {
                anyhow::bail!("HANDLE_DB_PATH is not set; stored copies are not persisted");
            }
            let record = sync
                .database()
                .storage_video_file_handles
                .get(id)
                .await
                .map_err(report)?
                .ok_or_else(|| report(AppError::NotFound(format!("Stored copy for video {}", id))))?;
            print_json(&record)?;
        }
    }

    Ok(())
}
