//! Error types module
//!
//! All errors raised by Player components are unified under `AppError`. The only
//! domain-specific kind is `MissingLocalFileHandle`; everything else wraps failures
//! of the persistence tables, the storage backend or the host filesystem.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;

use crate::models::PermissionState;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors the caller is meant to handle
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be reported to the caller.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "MISSING_LOCAL_FILE_HANDLE")
    fn error_code(&self) -> &'static str;

    /// Whether the operation can succeed if retried after caller action
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Why a local file handle could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingHandleReason {
    /// No `localVideoFileHandles` record exists for the video.
    NotStored,
    /// The record exists but read permission is not granted.
    PermissionNotGranted(PermissionState),
}

impl Display for MissingHandleReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MissingHandleReason::NotStored => write!(f, "no local file handle is stored"),
            MissingHandleReason::PermissionNotGranted(state) => {
                write!(f, "read permission is {} rather than granted", state)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing local file handle: {message} ({reason})")]
    MissingLocalFileHandle {
        reason: MissingHandleReason,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Handle record expected but absent.
    pub fn handle_not_stored(message: impl Into<String>) -> Self {
        AppError::MissingLocalFileHandle {
            reason: MissingHandleReason::NotStored,
            message: message.into(),
        }
    }

    /// Handle present but not usable without a granted read permission.
    pub fn permission_not_granted(state: PermissionState, message: impl Into<String>) -> Self {
        AppError::MissingLocalFileHandle {
            reason: MissingHandleReason::PermissionNotGranted(state),
            message: message.into(),
        }
    }

    /// The reason, when this is a `MissingLocalFileHandle` error.
    pub fn missing_handle_reason(&self) -> Option<MissingHandleReason> {
        match self {
            AppError::MissingLocalFileHandle { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Database(format!("JSON encoding error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{:#}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, log_level).
fn app_error_static_metadata(err: &AppError) -> (&'static str, bool, LogLevel) {
    match err {
        AppError::MissingLocalFileHandle {
            reason: MissingHandleReason::PermissionNotGranted(_),
            ..
        } => ("MISSING_LOCAL_FILE_HANDLE", true, LogLevel::Debug),
        AppError::MissingLocalFileHandle { .. } => {
            ("MISSING_LOCAL_FILE_HANDLE", false, LogLevel::Warn)
        }
        AppError::NotFound(_) => ("NOT_FOUND", false, LogLevel::Debug),
        AppError::InvalidInput(_) => ("INVALID_INPUT", false, LogLevel::Debug),
        AppError::Storage(_) => ("STORAGE_ERROR", true, LogLevel::Error),
        AppError::Database(_) => ("DATABASE_ERROR", true, LogLevel::Error),
        AppError::Io(_) => ("IO_ERROR", true, LogLevel::Error),
        AppError::Internal(_) => ("INTERNAL_ERROR", false, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}
