//! HTTP handlers for media endpoints.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::media::{UploadMediaCommand, UploadMediaHandler};
use crate::ports::{MediaStorage, StorageError};

use super::dto::UploadResponse;

/// Multipart field name carrying the uploaded file.
const FILE_FIELD: &str = "file";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the media route group.
#[derive(Clone)]
pub struct MediaAppState {
    pub storage: Arc<dyn MediaStorage>,
}

impl MediaAppState {
    pub fn upload_handler(&self) -> UploadMediaHandler {
        UploadMediaHandler::new(self.storage.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/upload - Store an uploaded file
///
/// Requires a validated Bearer token; the authenticated user id namespaces
/// the object path. Reads the first multipart field named `file`.
pub async fn upload_media(
    State(state): State<MediaAppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, MediaApiError> {
    let mut file: Option<(Option<String>, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| MediaApiError::InvalidMultipart)?
    {
        if field.name() == Some(FILE_FIELD) {
            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|_| MediaApiError::InvalidMultipart)?
                .to_vec();
            file = Some((filename, content_type, bytes));
            break;
        }
    }

    let (filename, content_type, bytes) = file.ok_or(MediaApiError::NoFile)?;

    let handler = state.upload_handler();
    let result = handler
        .handle(UploadMediaCommand {
            user_id: user.id,
            filename,
            content_type,
            bytes,
        })
        .await?;

    Ok(Json(UploadResponse { url: result.url }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for the media route group.
#[derive(Debug)]
pub enum MediaApiError {
    /// No multipart field named `file` was present.
    NoFile,
    /// The multipart body could not be read.
    InvalidMultipart,
    /// The storage backend failed or is not configured.
    Storage(StorageError),
}

impl From<StorageError> for MediaApiError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl IntoResponse for MediaApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            MediaApiError::NoFile => (StatusCode::BAD_REQUEST, "NO_FILE", "No file uploaded"),
            MediaApiError::InvalidMultipart => (
                StatusCode::BAD_REQUEST,
                "INVALID_MULTIPART",
                "Invalid multipart request",
            ),
            MediaApiError::Storage(StorageError::NotConfigured) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "NOT_CONFIGURED",
                "Storage backend not configured",
            ),
            MediaApiError::Storage(err) => {
                // Backend detail stays in the logs, not the response
                tracing::error!(error = %err, "Upload failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPLOAD_FAILED",
                    "Failed to upload file",
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": code
            })),
        )
            .into_response()
    }
}
