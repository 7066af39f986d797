#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use player_core::{
    AppError, FileMetadata, LocalFileHandle, LocalFileReader, PermissionMode, PermissionState,
    StorageBackend, StorageFileHandleRecord, Video,
};
use player_db::Database;
use player_services::{StorageCopier, VideoHandleSynchronizer};

/// Scripted local file handle: `request_permission` resolves to a fixed state
/// which later `query_permission` calls then report.
#[derive(Debug)]
pub struct MockFileHandle {
    metadata: FileMetadata,
    contents: Vec<u8>,
    permission: Mutex<PermissionState>,
    request_result: PermissionState,
    requests: Mutex<usize>,
}

impl MockFileHandle {
    pub fn new(name: &str, content_type: &str, initial: PermissionState) -> Self {
        Self {
            metadata: FileMetadata {
                name: name.to_string(),
                content_type: content_type.to_string(),
                size_bytes: 4,
                last_modified: Some(Utc::now()),
            },
            contents: b"clip".to_vec(),
            permission: Mutex::new(initial),
            request_result: initial,
            requests: Mutex::new(0),
        }
    }

    pub fn resolving_request_to(mut self, state: PermissionState) -> Self {
        self.request_result = state;
        self
    }

    pub fn request_count(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

#[async_trait]
impl LocalFileHandle for MockFileHandle {
    async fn get_file(&self) -> Result<FileMetadata, AppError> {
        Ok(self.metadata.clone())
    }

    async fn query_permission(&self, _mode: PermissionMode) -> Result<PermissionState, AppError> {
        Ok(*self.permission.lock().unwrap())
    }

    async fn request_permission(
        &self,
        _mode: PermissionMode,
    ) -> Result<PermissionState, AppError> {
        *self.requests.lock().unwrap() += 1;
        *self.permission.lock().unwrap() = self.request_result;
        Ok(self.request_result)
    }

    async fn open_read(&self) -> Result<LocalFileReader, AppError> {
        Ok(Box::pin(std::io::Cursor::new(self.contents.clone())))
    }
}

/// Copier that records its calls instead of copying anything.
#[derive(Default)]
pub struct RecordingCopier {
    calls: Mutex<Vec<(Arc<dyn LocalFileHandle>, Video)>>,
    fail: bool,
    refuse_with: Option<PermissionState>,
}

impl RecordingCopier {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
            refuse_with: None,
        }
    }

    /// Copier whose reads are refused by the host with the given permission state.
    pub fn refusing(state: PermissionState) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
            refuse_with: Some(state),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(Arc<dyn LocalFileHandle>, Video)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageCopier for RecordingCopier {
    async fn copy_to_storage(
        &self,
        file_handle: Arc<dyn LocalFileHandle>,
        video: &Video,
    ) -> Result<StorageFileHandleRecord, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((file_handle, video.clone()));

        if let Some(state) = self.refuse_with {
            return Err(AppError::permission_not_granted(
                state,
                "Host refused to read the local file",
            ));
        }

        if self.fail {
            return Err(AppError::Storage("disk full".to_string()));
        }

        Ok(StorageFileHandleRecord {
            id: video.id(),
            backend: StorageBackend::Memory,
            key: format!("videos/{}/{}", video.id(), video.name()),
            url: format!("memory://videos/{}/{}", video.id(), video.name()),
            size_bytes: video.size_bytes(),
            stored_at: Utc::now(),
        })
    }
}

/// Synchronizer over in-memory tables and a recording copier.
pub fn setup_synchronizer(copier: Arc<RecordingCopier>) -> VideoHandleSynchronizer {
    VideoHandleSynchronizer::new(Database::in_memory(), copier)
}

/// Compare handles by identity.
pub fn same_handle(a: &Arc<dyn LocalFileHandle>, b: &Arc<dyn LocalFileHandle>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}
