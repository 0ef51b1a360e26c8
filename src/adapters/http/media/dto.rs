//! HTTP DTOs for media endpoints.

use serde::Serialize;

/// Response for a stored upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// Public URL of the stored object.
    pub url: String,
}
