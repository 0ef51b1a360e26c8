//! UploadMediaHandler - command handler for authenticated media uploads.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::foundation::UserId;
use crate::ports::{MediaStorage, StorageError};

/// Command to store an uploaded file.
#[derive(Debug, Clone)]
pub struct UploadMediaCommand {
    /// The authenticated uploader; namespaces the object path.
    pub user_id: UserId,
    /// Original filename as sent by the client, if any.
    pub filename: Option<String>,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Result carrying the public URL of the stored object.
#[derive(Debug, Clone)]
pub struct UploadMediaResult {
    pub url: String,
}

/// Handler for media uploads.
///
/// Object paths are `{user_id}/{uuid}[.ext]`: the user prefix keeps uploads
/// namespaced per account, and the random component makes paths unguessable
/// and collision-free regardless of the client's filename.
pub struct UploadMediaHandler {
    storage: Arc<dyn MediaStorage>,
}

impl UploadMediaHandler {
    pub fn new(storage: Arc<dyn MediaStorage>) -> Self {
        Self { storage }
    }

    pub async fn handle(&self, cmd: UploadMediaCommand) -> Result<UploadMediaResult, StorageError> {
        let object_path = object_path_for(&cmd.user_id, cmd.filename.as_deref());
        let content_type = cmd
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let size = cmd.bytes.len();

        let stored = self
            .storage
            .store(&object_path, &content_type, cmd.bytes)
            .await?;

        tracing::info!(
            user_id = %cmd.user_id,
            path = %object_path,
            size,
            "Stored uploaded file"
        );

        Ok(UploadMediaResult {
            url: stored.public_url,
        })
    }
}

/// Builds the storage path, keeping the client's extension when present.
fn object_path_for(user_id: &UserId, filename: Option<&str>) -> String {
    let object_id = Uuid::new_v4();
    match filename.and_then(|name| name.rsplit_once('.')) {
        Some((_, ext)) if !ext.is_empty() => format!("{}/{}.{}", user_id, object_id, ext),
        _ => format!("{}/{}", user_id, object_id),
    }
}
