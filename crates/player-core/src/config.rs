//! Configuration module
//!
//! Settings for the storage backend and the handle database, read from the
//! environment (and a `.env` file when present).

use std::env;
use std::path::{Path, PathBuf};

use crate::storage_types::StorageBackend;

const DEFAULT_LOCAL_STORAGE_PATH: &str = "./data/media";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub storage_backend: StorageBackend,
    pub local_storage_path: PathBuf,
    pub local_storage_base_url: String,
    /// JSON file persisting `storageVideoFileHandles`; in memory when unset.
    pub handle_db_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.trim().parse::<StorageBackend>()?,
            None => StorageBackend::Local,
        };

        let local_storage_path = PathBuf::from(
            lookup("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|| DEFAULT_LOCAL_STORAGE_PATH.to_string()),
        );

        let local_storage_base_url = lookup("LOCAL_STORAGE_BASE_URL")
            .unwrap_or_else(|| format!("file://{}", local_storage_path.display()));

        let handle_db_path = lookup("HANDLE_DB_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            environment,
            storage_backend,
            local_storage_path,
            local_storage_base_url,
            handle_db_path,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage_backend == StorageBackend::Local
            && self.local_storage_path.as_os_str().is_empty()
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using local storage backend"
            ));
        }

        if let Some(path) = &self.handle_db_path {
            if path.is_dir() {
                return Err(anyhow::anyhow!(
                    "HANDLE_DB_PATH must name a file, not a directory: {}",
                    path.display()
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    pub fn local_storage_path(&self) -> &Path {
        &self.local_storage_path
    }

    pub fn local_storage_base_url(&self) -> &str {
        &self.local_storage_base_url
    }

    pub fn handle_db_path(&self) -> Option<&Path> {
        self.handle_db_path.as_deref()
    }
}
