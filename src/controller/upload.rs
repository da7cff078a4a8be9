/// Upload pipeline
///
/// Turns a batch of picked files into store requests and decides when a
/// finished upload should refresh the carousel. A refresh always re-lists
/// the store instead of appending the uploaded reference.

use crate::state::data::{PhotoUpload, StoredPhoto};
use crate::state::settings::RefreshMode;
use crate::store::SlideshowError;

/// Files accepted for upload and the ones skipped by the type check
#[derive(Debug, Default)]
pub struct UploadPlan {
    pub accepted: Vec<PhotoUpload>,
    pub skipped: Vec<String>,
}

#[derive(Debug)]
pub struct UploadPipeline {
    mode: RefreshMode,
    /// Store requests issued but not yet answered, across every open batch
    in_flight: usize,
    /// Whether any upload since the last batch refresh succeeded
    succeeded: bool,
}

impl UploadPipeline {
    pub fn new(mode: RefreshMode) -> Self {
        Self {
            mode,
            in_flight: 0,
            succeeded: false,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Split a batch by the coarse image check and count the accepted ones
    pub fn plan(&mut self, files: Vec<PhotoUpload>) -> UploadPlan {
        let mut plan = UploadPlan::default();

        for file in files {
            if file.is_image() {
                plan.accepted.push(file);
            } else {
                log::debug!(
                    "Skipping {} ({}): not an image",
                    file.file_name,
                    file.media_type
                );
                plan.skipped.push(file.file_name);
            }
        }

        self.in_flight += plan.accepted.len();
        plan
    }

    /// Record one store answer. Returns true if the photo list should be
    /// fetched again now.
    pub fn complete(&mut self, result: Result<StoredPhoto, SlideshowError>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        let stored = match result {
            Ok(stored) => {
                log::info!("📤 Uploaded {}", stored.reference);
                true
            }
            Err(SlideshowError::UnsupportedType(media_type)) => {
                log::debug!("Store refused {media_type}: not an image");
                false
            }
            Err(e) => {
                log::error!("❌ {e}");
                false
            }
        };

        match self.mode {
            RefreshMode::PerUpload => stored,
            RefreshMode::AfterBatch => {
                self.succeeded |= stored;
                if self.in_flight > 0 {
                    return false;
                }
                std::mem::take(&mut self.succeeded)
            }
        }
    }
}
