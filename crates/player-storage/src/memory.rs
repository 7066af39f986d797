//! In-memory storage backend, for tests and throwaway sessions.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::RwLock;

use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;

const URL_SCHEME: &str = "memory://";
/// Upper bound on the buffer reserved from a caller's length hint.
const MAX_PREALLOCATE_BYTES: usize = 8 * 1024 * 1024;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn upload_stream(
        &self,
        storage_key: &str,
        _content_type: &str,
        content_length: Option<u64>,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<(String, String, u64)> {
        if storage_key.is_empty() {
            return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
        }

        let capacity = content_length
            .map(|len| usize::try_from(len).unwrap_or(usize::MAX).min(MAX_PREALLOCATE_BYTES))
            .unwrap_or(0);
        let mut data = Vec::with_capacity(capacity);
        reader
            .read_to_end(&mut data)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Failed to read stream: {}", e)))?;

        let size = data.len() as u64;
        self.objects
            .write()
            .await
            .insert(storage_key.to_string(), Bytes::from(data));

        tracing::debug!(key = %storage_key, size_bytes = size, "Memory storage upload successful");

        Ok((
            storage_key.to_string(),
            format!("{}{}", URL_SCHEME, storage_key),
            size,
        ))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(storage_key)
            .map(|b| b.to_vec())
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(storage_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.objects.write().await.remove(storage_key);
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_download_delete() {
        let storage = InMemoryStorage::new();
        let reader = Box::pin(std::io::Cursor::new(b"abc".to_vec()));

        let (key, url, size) = storage
            .upload_stream("videos/v/a.mp4", "video/mp4", Some(3), reader)
            .await
            .unwrap();

        assert_eq!(url, "memory://videos/v/a.mp4");
        assert_eq!(size, 3);
        assert_eq!(storage.download(&key).await.unwrap(), b"abc".to_vec());

        storage.delete(&key).await.unwrap();
        assert!(!storage.exists(&key).await.unwrap());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_oversized_length_hint_is_not_trusted() {
        let storage = InMemoryStorage::new();
        let reader = Box::pin(std::io::Cursor::new(b"tiny".to_vec()));

        let (key, _, size) = storage
            .upload_stream("videos/v/b.mp4", "video/mp4", Some(u64::MAX), reader)
            .await
            .unwrap();

        assert_eq!(size, 4);
        assert_eq!(storage.download(&key).await.unwrap(), b"tiny".to_vec());
    }

    #[tokio::test]
    async fn test_download_missing() {
        let storage = InMemoryStorage::new();
        assert!(matches!(
            storage.download("nope").await,
            Err(StorageError::NotFound(_))
        ));
    }
}
