//! Shared key generation for storage backends.
//!
//! Key format: `videos/{video_id}/{filename}`.

use uuid::Uuid;

const MAX_FILENAME_LENGTH: usize = 255;

/// Generate the storage key for a video's durable copy.
pub fn generate_storage_key(video_id: Uuid, filename: &str) -> String {
    format!("videos/{}/{}", video_id, sanitize_filename(filename))
}

/// Reduce a user-visible file name to a safe key segment.
fn sanitize_filename(filename: &str) -> String {
    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('.').is_empty() || sanitized.contains("..") {
        return "file".to_string();
    }

    sanitized
}
