//! Local filesystem media store issuing public URL paths.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use capture_core::config::StorageConfig;
use capture_core::error::{AppError, ErrorKind};
use capture_core::result::AppResult;

/// Stores uploaded media on the local filesystem.
///
/// Objects are keyed `{category}/{uuid}.{ext}` under the configured media
/// root; the returned public path is the same key under the configured
/// public URL prefix.
#[derive(Debug, Clone)]
pub struct MediaStore {
    /// Root directory for all stored media.
    root: PathBuf,
    /// Public URL path prefix ("/media").
    public_path: String,
    /// Allowed content types for uploads.
    allowed_content_types: Vec<String>,
}

impl MediaStore {
    /// Create a new media store from configuration, creating the root
    /// directory if needed.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.media_root);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create media root: {}", root.display()),
                e,
            )
        })?;

        Ok(Self {
            root,
            public_path: config.public_path.trim_end_matches('/').to_string(),
            allowed_content_types: config.allowed_content_types.clone(),
        })
    }

    /// The directory media is served from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The public URL prefix media is served under.
    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    /// Validate a declared content type against the allow-list and return
    /// the file extension to store under.
    pub fn extension_for(&self, content_type: &str) -> AppResult<&'static str> {
        if !self
            .allowed_content_types
            .iter()
            .any(|t| t == content_type)
        {
            return Err(AppError::validation(format!(
                "Unsupported media type: {content_type}"
            )));
        }

        Ok(match content_type {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "video/mp4" => "mp4",
            _ => "bin",
        })
    }

    /// Store a media object and return its public URL path.
    pub async fn store(
        &self,
        category: &str,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<String> {
        let ext = self.extension_for(content_type)?;
        let key = format!("{category}/{}.{ext}", Uuid::new_v4());
        let full_path = self.root.join(&key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create media directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write media: {key}"), e)
        })?;

        debug!(key, bytes = data.len(), "Stored media object");
        Ok(format!("{}/{key}", self.public_path))
    }

    /// Delete a media object by its public URL path. Missing objects are
    /// not an error.
    pub async fn delete(&self, public_url_path: &str) -> AppResult<()> {
        let Some(key) = public_url_path
            .strip_prefix(&self.public_path)
            .map(|k| k.trim_start_matches('/'))
        else {
            return Ok(());
        };

        let full_path = self.root.join(key);
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete media: {key}"),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture_core::config::StorageConfig;

    async fn make_store(dir: &tempfile::TempDir) -> MediaStore {
        let config = StorageConfig {
            media_root: dir.path().to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };
        MediaStore::new(&config).await.unwrap()
    }

    #[tokio::test]
    async fn store_returns_a_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;

        let url = store
            .store("highlights", "image/png", Bytes::from_static(b"png"))
            .await
            .unwrap();

        assert!(url.starts_with("/media/highlights/"));
        assert!(url.ends_with(".png"));
    }

    #[tokio::test]
    async fn rejects_disallowed_content_types() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;

        let err = store
            .store("highlights", "application/zip", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, capture_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(&dir).await;

        let url = store
            .store("avatars", "image/jpeg", Bytes::from_static(b"jpg"))
            .await
            .unwrap();
        store.delete(&url).await.unwrap();
        store.delete(&url).await.unwrap();
    }
}
