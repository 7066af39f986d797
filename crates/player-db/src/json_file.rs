//! Handle table persisted as a JSON file.
//!
//! The whole table is held in memory and rewritten on every `put`. Writes go to
//! a sibling temporary file first and are then renamed over the table file.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use player_core::{AppError, Record};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::table::HandleTable;

pub struct JsonFileTable<R> {
    name: String,
    path: PathBuf,
    rows: RwLock<HashMap<Uuid, R>>,
}

impl<R> JsonFileTable<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    /// Open the table at `path`, creating an empty one if the file does not exist.
    pub async fn open(name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let name = name.into();
        let path = path.into();

        let rows = if fs::try_exists(&path).await? {
            let raw = fs::read(&path).await.map_err(|e| {
                AppError::Database(format!("Failed to read table {}: {}", path.display(), e))
            })?;
            let records: Vec<R> = serde_json::from_slice(&raw)?;
            records.into_iter().map(|r| (r.id(), r)).collect()
        } else {
            HashMap::new()
        };

        tracing::debug!(
            db.table = %name,
            path = %path.display(),
            rows = rows.len(),
            "Opened JSON handle table"
        );

        Ok(Self {
            name,
            path,
            rows: RwLock::new(rows),
        })
    }

    async fn flush(&self, rows: &HashMap<Uuid, R>) -> Result<(), AppError> {
        let mut records: Vec<&R> = rows.values().collect();
        records.sort_by_key(|r| r.id());
        let encoded = serde_json::to_vec_pretty(&records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).await.map_err(|e| {
            AppError::Database(format!(
                "Failed to create {}: {}",
                tmp_path.display(),
                e
            ))
        })?;
        file.write_all(&encoded).await?;
        file.sync_all().await?;
        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            AppError::Database(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

#[async_trait]
impl<R> HandleTable<R> for JsonFileTable<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(skip(self), fields(db.table = %self.name, db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<R>, AppError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    #[tracing::instrument(skip(self, record), fields(db.table = %self.name, db.record_id = %record.id()))]
    async fn put(&self, record: R) -> Result<(), AppError> {
        let mut rows = self.rows.write().await;
        let previous = rows.insert(record.id(), record.clone());

        if let Err(e) = self.flush(&rows).await {
            // Keep memory consistent with what is on disk.
            match previous {
                Some(old) => rows.insert(record.id(), old),
                None => rows.remove(&record.id()),
            };
            return Err(e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use player_core::{StorageBackend, StorageFileHandleRecord};
    use tempfile::tempdir;

    fn record(id: Uuid) -> StorageFileHandleRecord {
        StorageFileHandleRecord {
            id,
            backend: StorageBackend::Local,
            key: format!("videos/{}/clip.mp4", id),
            url: format!("file:///media/videos/{}/clip.mp4", id),
            size_bytes: 42,
            stored_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("handles.json");
        let table: JsonFileTable<StorageFileHandleRecord> =
            JsonFileTable::open("storage", &path).await.unwrap();

        assert!(table.get(Uuid::new_v4()).await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("handles.json");
        let id = Uuid::new_v4();
        let original = record(id);

        {
            let table: JsonFileTable<StorageFileHandleRecord> =
                JsonFileTable::open("storage", &path).await.unwrap();
            table.put(original.clone()).await.unwrap();
        }

        let reopened: JsonFileTable<StorageFileHandleRecord> =
            JsonFileTable::open("storage", &path).await.unwrap();
        assert_eq!(reopened.get(id).await.unwrap(), Some(original));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("handles.json");
        std::fs::write(&path, b"not json").unwrap();

        let result: Result<JsonFileTable<StorageFileHandleRecord>, _> =
            JsonFileTable::open("storage", &path).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
