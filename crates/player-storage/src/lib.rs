//! Player Storage Library
//!
//! Durable storage for copies of local video files, plus a filesystem-backed
//! implementation of the local file handle capability.
//!
//! # Storage key format
//!
//! Keys are video-scoped: `videos/{video_id}/{filename}`. Keys must not contain
//! `..` or a leading `/`. Key generation is centralized in the `keys` module so
//! all backends stay consistent.

pub mod factory;
pub mod fs_handle;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use fs_handle::FsFileHandle;
pub use keys::generate_storage_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::InMemoryStorage;
pub use player_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
