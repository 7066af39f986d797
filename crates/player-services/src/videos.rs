//! Video handle synchronizer
//!
//! Keeps a video's handle flags in line with what is persisted for it:
//! whether a local file handle is stored, what read permission that handle
//! currently has, and whether a durable copy exists in storage. Every operation
//! takes the video by reference and returns an updated copy; flags are pure
//! projections of persisted state and are refreshed on demand.

use std::sync::Arc;

use player_core::{
    AppError, LocalFileHandle, LocalFileHandleRecord, PermissionMode, Session, Video,
};
use player_db::Database;

use crate::video_storage::StorageCopier;

#[derive(Clone)]
pub struct VideoHandleSynchronizer {
    database: Database,
    copier: Arc<dyn StorageCopier>,
}

impl VideoHandleSynchronizer {
    pub fn new(database: Database, copier: Arc<dyn StorageCopier>) -> Self {
        Self { database, copier }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Create a video from a local file, join it to `session` and store its handle.
    ///
    /// The handle flags are synced and the file is copied into storage. When the
    /// synced permission is not `granted` the copy is skipped and the video is
    /// still returned; the caller is expected to request permission and then call
    /// `store_file`. Copy failures are returned as-is and nothing created so far
    /// is rolled back.
    #[tracing::instrument(skip_all, fields(session.id = %session.id))]
    pub async fn create_video_in_session(
        &self,
        session: &mut Session,
        file_handle: Arc<dyn LocalFileHandle>,
    ) -> Result<Video, AppError> {
        let file = file_handle.get_file().await?;
        let video = Video::from_file(&file);

        session.add_video(&video);

        self.database
            .local_video_file_handles
            .put(LocalFileHandleRecord {
                id: video.id(),
                file_handle,
            })
            .await?;

        tracing::debug!(video.id = %video.id(), name = %video.name(), "Stored local file handle");

        let video = self.sync_local_file_handle(&video).await?;
        let video = self.sync_local_file_permission(&video).await?;

        let permission = video.local_file_handle_permission();
        if !permission.is_granted() {
            tracing::warn!(
                video.id = %video.id(),
                permission = %permission,
                "Deferring storage copy until read permission is granted"
            );
            return Ok(video);
        }

        self.store_file(&video).await
    }

    /// Reflect whether a local file handle is stored for the video.
    #[tracing::instrument(skip_all, fields(video.id = %video.id()))]
    pub async fn sync_local_file_handle(&self, video: &Video) -> Result<Video, AppError> {
        let record = self.local_record(video).await?;
        Ok(video.with_local_file_handle_exists(record.is_some()))
    }

    /// Reflect the stored handle's current read permission, without prompting.
    ///
    /// A video without a stored handle is returned unchanged.
    #[tracing::instrument(skip_all, fields(video.id = %video.id()))]
    pub async fn sync_local_file_permission(&self, video: &Video) -> Result<Video, AppError> {
        let Some(record) = self.local_record(video).await? else {
            return Ok(video.clone());
        };

        let permission = record
            .file_handle
            .query_permission(PermissionMode::Read)
            .await?;

        Ok(video.with_local_file_handle_permission(permission))
    }

    /// Reflect whether a durable copy of the video is recorded in storage.
    #[tracing::instrument(skip_all, fields(video.id = %video.id()))]
    pub async fn sync_storage_file_handle(&self, video: &Video) -> Result<Video, AppError> {
        let record = self
            .database
            .storage_video_file_handles
            .get(video.id())
            .await?;

        Ok(video.with_storage_file_handle_exists(record.is_some()))
    }

    /// Ask for read permission on the stored handle; this may prompt the user.
    #[tracing::instrument(skip_all, fields(video.id = %video.id()))]
    pub async fn request_local_file_handle_permission(
        &self,
        video: &Video,
    ) -> Result<Video, AppError> {
        let record = self.local_record(video).await?.ok_or_else(|| {
            AppError::handle_not_stored(
                "Attempted to request permissions on videos file handle but it was not present",
            )
        })?;

        let permission = record
            .file_handle
            .request_permission(PermissionMode::Read)
            .await?;

        tracing::debug!(permission = %permission, "Requested read permission");

        Ok(video.with_local_file_handle_permission(permission))
    }

    /// Copy the video's local file into durable storage.
    ///
    /// Requires a stored handle and a video whose permission flag is already
    /// `granted`; this never requests permission itself. The returned video is
    /// unchanged, use `sync_storage_file_handle` to pick up the new copy.
    #[tracing::instrument(skip_all, fields(video.id = %video.id()))]
    pub async fn store_file(&self, video: &Video) -> Result<Video, AppError> {
        let record = self.local_record(video).await?.ok_or_else(|| {
            AppError::handle_not_stored("Attempted to use local file handle but it was not present")
        })?;

        let permission = video.local_file_handle_permission();
        if !permission.is_granted() {
            return Err(AppError::permission_not_granted(
                permission,
                "Attempting to copy file but it does not have permission granted",
            ));
        }

        self.copier
            .copy_to_storage(record.file_handle, video)
            .await?;

        Ok(video.clone())
    }

    /// Run all three syncs in order.
    pub async fn sync_video(&self, video: &Video) -> Result<Video, AppError> {
        let video = self.sync_local_file_handle(video).await?;
        let video = self.sync_local_file_permission(&video).await?;
        self.sync_storage_file_handle(&video).await
    }

    async fn local_record(&self, video: &Video) -> Result<Option<LocalFileHandleRecord>, AppError> {
        self.database
            .local_video_file_handles
            .get(video.id())
            .await
    }
}
