/// Photo store client module
///
/// This module handles everything that talks to the remote photo store:
/// - The `PhotoStore` seam used by the controller and the app (mod.rs)
/// - The reqwest-backed HTTP client (http.rs)
/// - Coarse media type detection for picked files (media.rs)

pub mod http;
pub mod media;

use async_trait::async_trait;

use crate::state::data::{PhotoUpload, StoredPhoto};

pub use http::HttpPhotoStore;

/// Every failure the slideshow recovers from.
///
/// None of these is fatal: each one is logged and the session carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlideshowError {
    /// Photo list unreachable or answered with a non-success status
    #[error("failed to fetch photos: {0}")]
    Fetch(String),
    /// Selected file is not an image
    #[error("unsupported media type `{0}`")]
    UnsupportedType(String),
    /// Upload rejected by the store
    #[error("upload failed: {0}")]
    Store(String),
    /// The window system refused to toggle fullscreen
    #[error("fullscreen request failed: {0}")]
    Fullscreen(String),
}

/// Remote photo store as seen by the slideshow
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Current photo references, in display order
    async fn list(&self) -> Result<Vec<String>, SlideshowError>;

    /// Submit one file. Non-image types are rejected before any request.
    async fn store(&self, upload: PhotoUpload) -> Result<StoredPhoto, SlideshowError>;

    /// Download the bytes behind a reference returned by `list`
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, SlideshowError>;

    /// Whether the store answers its health check
    async fn online(&self) -> bool;
}
