//! Media handlers.
//!
//! Command handlers for authenticated file uploads to public object storage.

mod upload_media;

pub use upload_media::{UploadMediaCommand, UploadMediaHandler, UploadMediaResult};
