/// Media type detection
///
/// Files picked from disk carry no declared type, so one is derived from the
/// extension. Only a coarse `image/*` check is applied, no decoding.

use image::ImageFormat;
use std::path::Path;

/// Fallback when the extension is unknown
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Extensions the photo store serves (offered in the file picker)
pub const PHOTO_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Declared media type for a file name (e.g., "beach.JPG" → "image/jpeg")
pub fn media_type_for(file_name: &str) -> &'static str {
    ImageFormat::from_path(Path::new(file_name))
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

pub fn is_image_type(media_type: &str) -> bool {
    media_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}
