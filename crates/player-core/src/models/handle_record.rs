//! Persisted handle records, keyed by video id.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::file_handle::LocalFileHandle;
use crate::storage_types::StorageBackend;

/// A row in a keyed handle table.
pub trait Record: Clone + Send + Sync + 'static {
    /// Primary key of the row (the owning video's id).
    fn id(&self) -> Uuid;
}

/// Row of the `localVideoFileHandles` table.
#[derive(Debug, Clone)]
pub struct LocalFileHandleRecord {
    pub id: Uuid,
    pub file_handle: Arc<dyn LocalFileHandle>,
}

impl Record for LocalFileHandleRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Row of the `storageVideoFileHandles` table: where the durable copy lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageFileHandleRecord {
    pub id: Uuid,
    pub backend: StorageBackend,
    pub key: String,
    pub url: String,
    pub size_bytes: u64,
    pub stored_at: DateTime<Utc>,
}

impl Record for StorageFileHandleRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}
