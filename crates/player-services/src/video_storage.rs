//! Copying local video files into durable storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use player_core::{AppError, LocalFileHandle, StorageFileHandleRecord, Video};
use player_db::HandleTable;
use player_storage::{generate_storage_key, Storage};

/// Copies the bytes behind a local file handle into durable storage.
#[async_trait]
pub trait StorageCopier: Send + Sync {
    async fn copy_to_storage(
        &self,
        file_handle: Arc<dyn LocalFileHandle>,
        video: &Video,
    ) -> Result<StorageFileHandleRecord, AppError>;
}

/// Streams the local file into a `Storage` backend and records where it went
/// in `storageVideoFileHandles`.
#[derive(Clone)]
pub struct VideoStorage {
    storage: Arc<dyn Storage>,
    storage_video_file_handles: Arc<dyn HandleTable<StorageFileHandleRecord>>,
}

impl VideoStorage {
    pub fn new(
        storage: Arc<dyn Storage>,
        storage_video_file_handles: Arc<dyn HandleTable<StorageFileHandleRecord>>,
    ) -> Self {
        Self {
            storage,
            storage_video_file_handles,
        }
    }
}

#[async_trait]
impl StorageCopier for VideoStorage {
    #[tracing::instrument(skip_all, fields(video.id = %video.id(), video.name = %video.name()))]
    async fn copy_to_storage(
        &self,
        file_handle: Arc<dyn LocalFileHandle>,
        video: &Video,
    ) -> Result<StorageFileHandleRecord, AppError> {
        let start = std::time::Instant::now();
        let file = file_handle.get_file().await?;
        let reader = file_handle.open_read().await?;
        let key = generate_storage_key(video.id(), &file.name);

        let (key, url, size_bytes) = self
            .storage
            .upload_stream(&key, &file.content_type, Some(file.size_bytes), reader)
            .await?;

        let record = StorageFileHandleRecord {
            id: video.id(),
            backend: self.storage.backend_type(),
            key,
            url,
            size_bytes,
            stored_at: Utc::now(),
        };

        if let Err(e) = self.storage_video_file_handles.put(record.clone()).await {
            // Without the record the copy is unreachable; don't leave it behind.
            if let Err(cleanup) = self.storage.delete(&record.key).await {
                tracing::warn!(key = %record.key, error = %cleanup, "Failed to remove orphaned copy");
            }
            return Err(e);
        }

        tracing::info!(
            key = %record.key,
            backend = %record.backend,
            size_bytes = record.size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Copied local file into storage"
        );

        Ok(record)
    }
}
