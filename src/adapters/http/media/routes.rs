//! Axum router configuration for media endpoints.

use axum::{routing::post, Router};

use super::handlers::{upload_media, MediaAppState};

/// Create the media API router.
///
/// # Routes
///
/// - `POST /upload` - Store an uploaded file (requires Bearer auth)
///
/// The auth middleware is layered on by the top-level router so the
/// validator can be shared across route groups.
pub fn media_routes() -> Router<MediaAppState> {
    Router::new().route("/upload", post(upload_media))
}
