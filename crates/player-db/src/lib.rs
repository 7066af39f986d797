//! Player Database Library
//!
//! Keyed persistence tables for local and storage file handle records. Each
//! table exposes `get`/`put` by video id behind the `HandleTable` trait so the
//! synchronizer can run against in-memory fakes or file-backed tables alike.

pub mod database;
pub mod json_file;
pub mod memory;
pub mod table;

// Re-export commonly used types
pub use database::{Database, LOCAL_VIDEO_FILE_HANDLES, STORAGE_VIDEO_FILE_HANDLES};
pub use json_file::JsonFileTable;
pub use memory::InMemoryTable;
pub use table::HandleTable;
