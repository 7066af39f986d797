//! Player Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! local file handle capability shared by all Player components.

pub mod config;
pub mod content_type;
pub mod error;
pub mod file_handle;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel, MissingHandleReason};
pub use file_handle::{FileMetadata, LocalFileHandle, LocalFileReader, PermissionMode};
pub use models::{
    LocalFileHandleRecord, PermissionState, Record, Session, StorageFileHandleRecord, Video,
};
pub use storage_types::StorageBackend;
