use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::video::Video;

/// A working session that videos are created under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    video_ids: Vec<Uuid>,
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Session {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            video_ids: Vec::new(),
        }
    }

    /// Join a video to this session. Adding the same video twice is a no-op.
    pub fn add_video(&mut self, video: &Video) {
        if !self.contains(video.id()) {
            self.video_ids.push(video.id());
        }
    }

    pub fn contains(&self, video_id: Uuid) -> bool {
        self.video_ids.contains(&video_id)
    }

    /// Ids of the session's videos, in the order they were added.
    pub fn video_ids(&self) -> &[Uuid] {
        &self.video_ids
    }
}
