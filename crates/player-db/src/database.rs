//! The handle database: the two named tables the synchronizer works against.

use std::sync::Arc;

use player_core::{AppError, Config, LocalFileHandleRecord, StorageFileHandleRecord};

use crate::json_file::JsonFileTable;
use crate::memory::InMemoryTable;
use crate::table::HandleTable;

pub const LOCAL_VIDEO_FILE_HANDLES: &str = "localVideoFileHandles";
pub const STORAGE_VIDEO_FILE_HANDLES: &str = "storageVideoFileHandles";

/// Explicitly injected persistence for the synchronizer.
#[derive(Clone)]
pub struct Database {
    pub local_video_file_handles: Arc<dyn HandleTable<LocalFileHandleRecord>>,
    pub storage_video_file_handles: Arc<dyn HandleTable<StorageFileHandleRecord>>,
}

impl Database {
    pub fn new(
        local_video_file_handles: Arc<dyn HandleTable<LocalFileHandleRecord>>,
        storage_video_file_handles: Arc<dyn HandleTable<StorageFileHandleRecord>>,
    ) -> Self {
        Self {
            local_video_file_handles,
            storage_video_file_handles,
        }
    }

    /// Both tables in memory.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryTable::<LocalFileHandleRecord>::new(LOCAL_VIDEO_FILE_HANDLES)),
            Arc::new(InMemoryTable::<StorageFileHandleRecord>::new(STORAGE_VIDEO_FILE_HANDLES)),
        )
    }

    /// Build the database from configuration.
    ///
    /// Local file handles are live host objects and always stay in memory; the
    /// storage table is persisted to `HANDLE_DB_PATH` when configured.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let storage: Arc<dyn HandleTable<StorageFileHandleRecord>> = match config.handle_db_path()
        {
            Some(path) => Arc::new(
                JsonFileTable::<StorageFileHandleRecord>::open(STORAGE_VIDEO_FILE_HANDLES, path)
                    .await?,
            ),
            None => Arc::new(InMemoryTable::<StorageFileHandleRecord>::new(STORAGE_VIDEO_FILE_HANDLES)),
        };

        Ok(Self::new(
            Arc::new(InMemoryTable::<LocalFileHandleRecord>::new(LOCAL_VIDEO_FILE_HANDLES)),
            storage,
        ))
    }
}
