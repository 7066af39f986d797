use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::permission::PermissionState;
use crate::file_handle::FileMetadata;

/// A user-visible video backed by a file on the user's local file system.
///
/// The three state flags are projections of persisted handle state. They are
/// refreshed by the synchronizer through the `with_*` transformations, each of
/// which returns an updated copy rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    id: Uuid,
    name: String,
    content_type: String,
    size_bytes: u64,
    created_at: DateTime<Utc>,
    local_file_handle_exists: bool,
    local_file_handle_permission: PermissionState,
    storage_file_handle_exists: bool,
}

impl Video {
    /// Create a new video with a fresh id and unsynced flags.
    pub fn new(name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Video {
            id: Uuid::new_v4(),
            name: name.into(),
            content_type: content_type.into(),
            size_bytes: 0,
            created_at: Utc::now(),
            local_file_handle_exists: false,
            local_file_handle_permission: PermissionState::Unknown,
            storage_file_handle_exists: false,
        }
    }

    pub fn from_file(file: &FileMetadata) -> Self {
        let mut video = Video::new(file.name.clone(), file.content_type.clone());
        video.size_bytes = file.size_bytes;
        video
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn local_file_handle_exists(&self) -> bool {
        self.local_file_handle_exists
    }

    pub fn local_file_handle_permission(&self) -> PermissionState {
        self.local_file_handle_permission
    }

    pub fn storage_file_handle_exists(&self) -> bool {
        self.storage_file_handle_exists
    }

    pub fn with_local_file_handle_exists(&self, exists: bool) -> Self {
        Video {
            local_file_handle_exists: exists,
            ..self.clone()
        }
    }

    pub fn with_local_file_handle_permission(&self, permission: PermissionState) -> Self {
        Video {
            local_file_handle_permission: permission,
            ..self.clone()
        }
    }

    pub fn with_storage_file_handle_exists(&self, exists: bool) -> Self {
        Video {
            storage_file_handle_exists: exists,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_metadata() -> FileMetadata {
        FileMetadata {
            name: "clip.mp4".to_string(),
            content_type: "video/mp4".to_string(),
            size_bytes: 1024,
            last_modified: None,
        }
    }

    #[test]
    fn test_video_from_file_copies_metadata() {
        let video = Video::from_file(&clip_metadata());

        assert_eq!(video.name(), "clip.mp4");
        assert_eq!(video.content_type(), "video/mp4");
        assert_eq!(video.size_bytes(), 1024);
        assert!(!video.local_file_handle_exists());
        assert_eq!(video.local_file_handle_permission(), PermissionState::Unknown);
        assert!(!video.storage_file_handle_exists());
    }

    #[test]
    fn test_videos_get_distinct_ids() {
        let a = Video::from_file(&clip_metadata());
        let b = Video::from_file(&clip_metadata());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_with_transformations_leave_original_untouched() {
        let video = Video::new("clip.mp4", "video/mp4");

        let updated = video
            .with_local_file_handle_exists(true)
            .with_local_file_handle_permission(PermissionState::Granted)
            .with_storage_file_handle_exists(true);

        assert_eq!(updated.id(), video.id());
        assert!(updated.local_file_handle_exists());
        assert_eq!(updated.local_file_handle_permission(), PermissionState::Granted);
        assert!(updated.storage_file_handle_exists());

        assert!(!video.local_file_handle_exists());
        assert_eq!(video.local_file_handle_permission(), PermissionState::Unknown);
        assert!(!video.storage_file_handle_exists());
    }

    #[test]
    fn test_video_serializes_flags() {
        let video = Video::new("clip.mp4", "video/mp4")
            .with_local_file_handle_permission(PermissionState::Prompt);
        let json = serde_json::to_value(&video).unwrap();

        assert_eq!(json["name"], "clip.mp4");
        assert_eq!(json["local_file_handle_permission"], "prompt");
        assert_eq!(json["local_file_handle_exists"], false);
    }
}
