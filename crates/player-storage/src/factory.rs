#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{InMemoryStorage, Storage, StorageBackend, StorageResult};
use player_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage = LocalStorage::new(
                config.local_storage_path(),
                config.local_storage_base_url().to_string(),
            )
            .await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(crate::StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),

        StorageBackend::Memory => Ok(Arc::new(InMemoryStorage::new())),
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn config(vars: HashMap<&'static str, String>) -> Config {
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[tokio::test]
    async fn test_create_local_storage() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("media");
        let config = config(HashMap::from([(
            "LOCAL_STORAGE_PATH",
            root.display().to_string(),
        )]));

        let storage = create_storage(&config).await.unwrap();

        assert_eq!(storage.backend_type(), StorageBackend::Local);
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn test_create_memory_storage() {
        let config = config(HashMap::from([("STORAGE_BACKEND", "memory".to_string())]));

        let storage = create_storage(&config).await.unwrap();

        assert_eq!(storage.backend_type(), StorageBackend::Memory);
    }
}
