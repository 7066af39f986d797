//! Local file handle backed by a path on the host filesystem.
//!
//! The handle remembers its own permission state. A handle created with
//! `picked` counts as chosen by the user and starts out granted; one created
//! with `new` starts at `prompt` and must be granted through
//! `request_permission`, which checks that the file can actually be opened.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use player_core::content_type::content_type_for;
use player_core::{
    AppError, FileMetadata, LocalFileHandle, LocalFileReader, PermissionMode, PermissionState,
};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct FsFileHandle {
    path: PathBuf,
    permission: Arc<Mutex<PermissionState>>,
}

impl FsFileHandle {
    /// A handle whose read permission still has to be requested.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_permission(path, PermissionState::Prompt)
    }

    /// A handle to a file the user explicitly chose; read access is granted.
    pub fn picked(path: impl Into<PathBuf>) -> Self {
        Self::with_permission(path, PermissionState::Granted)
    }

    pub fn with_permission(path: impl Into<PathBuf>, permission: PermissionState) -> Self {
        Self {
            path: path.into(),
            permission: Arc::new(Mutex::new(permission)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn current_permission(&self) -> PermissionState {
        match self.permission.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn set_permission(&self, state: PermissionState) {
        match self.permission.lock() {
            Ok(mut guard) => *guard = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }
}

#[async_trait]
impl LocalFileHandle for FsFileHandle {
    async fn get_file(&self) -> Result<FileMetadata, AppError> {
        let metadata = fs::metadata(&self.path).await.map_err(|e| {
            AppError::NotFound(format!("Local file {}: {}", self.path.display(), e))
        })?;

        if !metadata.is_file() {
            return Err(AppError::InvalidInput(format!(
                "{} is not a regular file",
                self.path.display()
            )));
        }

        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(FileMetadata {
            content_type: content_type_for(&name).to_string(),
            name,
            size_bytes: metadata.len(),
            last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        })
    }

    async fn query_permission(&self, _mode: PermissionMode) -> Result<PermissionState, AppError> {
        Ok(self.current_permission())
    }

    async fn request_permission(
        &self,
        mode: PermissionMode,
    ) -> Result<PermissionState, AppError> {
        if mode == PermissionMode::ReadWrite {
            let state = PermissionState::Denied;
            tracing::debug!(path = %self.path.display(), ?mode, %state, "Write access is never granted");
            return Ok(state);
        }

        let state = match fs::File::open(&self.path).await {
            Ok(_) => PermissionState::Granted,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "File could not be opened for reading");
                PermissionState::Denied
            }
        };

        self.set_permission(state);
        Ok(state)
    }

    async fn open_read(&self) -> Result<LocalFileReader, AppError> {
        let state = self.current_permission();
        if !state.is_granted() {
            return Err(AppError::permission_not_granted(
                state,
                format!("Cannot read {} without permission", self.path.display()),
            ));
        }

        let file = fs::File::open(&self.path).await?;
        Ok(Box::pin(file))
    }
}
