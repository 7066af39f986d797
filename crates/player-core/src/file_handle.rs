//! Local file handle capability
//!
//! A local file handle is an opaque reference to a file the user picked on their
//! own machine. Access to it is gated by a read permission that may have to be
//! requested from the user. Hosts provide an implementation of `LocalFileHandle`;
//! the synchronizer only ever talks to this trait.

use std::fmt::Debug;
use std::pin::Pin;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

use crate::error::AppError;
use crate::models::PermissionState;

/// Access mode a permission is queried or requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionMode {
    Read,
    ReadWrite,
}

/// Metadata read from a local file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Reader over a local file's bytes.
pub type LocalFileReader = Pin<Box<dyn AsyncRead + Send + Unpin>>;

#[async_trait]
pub trait LocalFileHandle: Send + Sync + Debug {
    /// Read the file's metadata (name, content type, size).
    async fn get_file(&self) -> Result<FileMetadata, AppError>;

    /// Current permission state for `mode`. Never prompts the user.
    async fn query_permission(&self, mode: PermissionMode) -> Result<PermissionState, AppError>;

    /// Ask for permission for `mode`; may prompt the user.
    async fn request_permission(&self, mode: PermissionMode)
        -> Result<PermissionState, AppError>;

    /// Open the file for reading its bytes.
    async fn open_read(&self) -> Result<LocalFileReader, AppError>;
}
