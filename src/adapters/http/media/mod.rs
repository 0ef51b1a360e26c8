//! HTTP adapter for media endpoints.
//!
//! Exposes authenticated file upload via REST API:
//! - `POST /api/v1/upload` - Store an uploaded file, returns its public URL

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::UploadResponse;
pub use handlers::{MediaApiError, MediaAppState};
pub use routes::media_routes;
