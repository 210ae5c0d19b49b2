//! Media storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root path for uploaded media files.
    #[serde(default = "default_media_root")]
    pub media_root: String,
    /// Public URL path prefix under which media is served.
    #[serde(default = "default_public_path")]
    pub public_path: String,
    /// Maximum upload size in bytes (default 50 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Allowed media content types.
    #[serde(default = "default_allowed_types")]
    pub allowed_content_types: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_root: default_media_root(),
            public_path: default_public_path(),
            max_upload_size_bytes: default_max_upload(),
            allowed_content_types: default_allowed_types(),
        }
    }
}

fn default_media_root() -> String {
    "data/media".to_string()
}

fn default_public_path() -> String {
    "/media".to_string()
}

fn default_max_upload() -> u64 {
    50 * 1024 * 1024
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/webp".to_string(),
        "video/mp4".to_string(),
    ]
}
