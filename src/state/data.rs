/// Shared data structures for the slideshow state
///
/// These structs represent the data model that flows between
/// the photo store client, the carousel and the UI layer.

/// Represents a single displayable photo in the carousel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Opaque locator returned by the store (e.g., "/static/photos/beach.jpg")
    reference: String,
    /// Index within the ordered sequence (changes only on rebuild)
    position: usize,
    /// True for exactly one slide of a non-empty carousel
    active: bool,
}

impl Slide {
    pub(crate) fn new(reference: String, position: usize) -> Self {
        Self {
            reference,
            position,
            active: false,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// A user-selected file waiting to be sent to the store
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// Filename only (e.g., "IMG_0042.png")
    pub file_name: String,
    /// Declared media type (e.g., "image/png")
    pub media_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Coarse type check: anything declared as `image/*`
    pub fn is_image(&self) -> bool {
        crate::store::media::is_image_type(&self.media_type)
    }
}

// Keep file contents out of log lines
impl std::fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The store's answer to a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    pub reference: String,
}
