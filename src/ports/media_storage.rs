//! Media storage port for uploaded files.
//!
//! Contract for the object storage backend that holds user uploads. The
//! upload flow hands over raw bytes plus a destination path and gets back a
//! public URL to return to the client.

use async_trait::async_trait;

/// A stored media object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Publicly reachable URL of the uploaded object.
    pub public_url: String,
}

/// Port for object storage backends.
///
/// # Contract
///
/// Implementations must:
/// - Overwrite an existing object at the same path rather than erroring
/// - Return a URL that resolves without authentication
/// - Return `StorageError::NotConfigured` when no backend is wired up
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Stores an object and returns its public URL.
    ///
    /// # Arguments
    ///
    /// * `object_path` - Bucket-relative destination path
    /// * `content_type` - MIME type to serve the object with
    /// * `bytes` - Raw file contents
    async fn store(
        &self,
        object_path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredMedia, StorageError>;
}

/// Errors from media storage operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Storage credentials are absent; no call was attempted.
    #[error("Storage backend not configured")]
    NotConfigured,

    /// The backend accepted the connection but refused the upload.
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// The backend could not be reached.
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    // Trait object safety test
    #[test]
    fn media_storage_is_object_safe() {
        fn _accepts_dyn(_storage: &dyn MediaStorage) {}
    }

    /// Mock that records stored paths and echoes a deterministic URL.
    struct RecordingStorage {
        paths: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MediaStorage for RecordingStorage {
        async fn store(
            &self,
            object_path: &str,
            _content_type: &str,
            _bytes: Vec<u8>,
        ) -> Result<StoredMedia, StorageError> {
            self.paths.lock().unwrap().push(object_path.to_string());
            Ok(StoredMedia {
                public_url: format!("https://cdn.example/{}", object_path),
            })
        }
    }

    #[tokio::test]
    async fn store_returns_public_url_for_path() {
        let storage = RecordingStorage {
            paths: Mutex::new(Vec::new()),
        };

        let stored = storage
            .store("user-1/photo.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(stored.public_url, "https://cdn.example/user-1/photo.png");
        assert_eq!(
            storage.paths.lock().unwrap().as_slice(),
            &["user-1/photo.png".to_string()]
        );
    }

    #[tokio::test]
    async fn media_storage_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn MediaStorage>();
    }
}
