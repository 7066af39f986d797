//! Wiring shared by the `player` binary: tracing setup and construction of the
//! synchronizer from configuration.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use player_core::{
    AppError, Config, ErrorMetadata, LogLevel, PermissionState, Session, StorageFileHandleRecord,
    Video,
};
use player_db::Database;
use player_services::{VideoHandleSynchronizer, VideoStorage};
use player_storage::{create_storage, FsFileHandle};
use serde::Serialize;

/// Initialize tracing for CLI binaries. Production writes JSON lines.
pub fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Build the synchronizer and its database from configuration.
pub async fn build_synchronizer(config: &Config) -> anyhow::Result<VideoHandleSynchronizer> {
    let database = Database::from_config(config)
        .await
        .context("Failed to open handle database")?;
    let storage = create_storage(config)
        .await
        .context("Failed to create storage backend")?;
    let copier = VideoStorage::new(storage, database.storage_video_file_handles.clone());

    Ok(VideoHandleSynchronizer::new(database, Arc::new(copier)))
}

#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub session: Session,
    pub video: Video,
    pub storage: Option<StorageFileHandleRecord>,
}

/// Import a local file into a new session and store its durable copy.
///
/// With `granted` the file counts as picked by the user. Otherwise read
/// permission is requested once before retrying the copy.
pub async fn import_file(
    sync: &VideoHandleSynchronizer,
    path: &Path,
    session_name: &str,
    granted: bool,
) -> anyhow::Result<ImportReport> {
    let handle = if granted {
        FsFileHandle::picked(path)
    } else {
        FsFileHandle::new(path)
    };

    let mut session = Session::new(session_name);
    let video = sync
        .create_video_in_session(&mut session, Arc::new(handle))
        .await
        .map_err(report)
        .with_context(|| format!("Failed to import {}", path.display()))?;

    let mut video = sync.sync_storage_file_handle(&video).await.map_err(report)?;

    if !video.storage_file_handle_exists() {
        if video.local_file_handle_permission() != PermissionState::Granted {
            video = sync
                .request_local_file_handle_permission(&video)
                .await
                .map_err(report)?;
        }
        video = sync.store_file(&video).await.map_err(report)?;
    }

    let video = sync.sync_video(&video).await.map_err(report)?;
    let storage = sync
        .database()
        .storage_video_file_handles
        .get(video.id())
        .await
        .map_err(report)?;

    Ok(ImportReport {
        session,
        video,
        storage,
    })
}

/// Log an error at its own level and turn it into an `anyhow::Error`.
pub fn report(err: AppError) -> anyhow::Error {
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(code = err.error_code(), error = %err, "Operation failed"),
        LogLevel::Warn => tracing::warn!(code = err.error_code(), error = %err, "Operation failed"),
        LogLevel::Error => tracing::error!(code = err.error_code(), error = %err, "Operation failed"),
    }
    anyhow::Error::new(err)
}
