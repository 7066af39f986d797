//! Player Services Library
//!
//! The video handle synchronizer and the storage-copy step it delegates to.

pub mod video_storage;
pub mod videos;

// Re-export commonly used types
pub use video_storage::{StorageCopier, VideoStorage};
pub use videos::VideoHandleSynchronizer;
