/// Slideshow controller
///
/// One `Slideshow` per viewing session. The input router and the UI emit
/// `Intent`s; the controller applies them to its state machines and hands
/// back `Effect`s for the host to run (network, file picker, window).
/// Results come back through `photos_listed` and `photo_stored`.

pub mod input;
pub mod upload;

use std::time::Instant;

use crate::state::carousel::{Carousel, RebuildOutcome};
use crate::state::clock::Clock;
use crate::state::data::{PhotoUpload, StoredPhoto};
use crate::state::playback::{PlaybackState, PlaybackTimer};
use crate::state::settings::Settings;
use crate::state::visibility::VisibilityTimer;
use crate::store::SlideshowError;

use upload::UploadPipeline;

/// Something the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Previous,
    Next,
    TogglePlayback,
    ToggleFullscreen,
    OpenUpload,
    FilesSelected(Vec<PhotoUpload>),
    /// Pointer movement, touch, unbound key or explicit show request
    Activity,
}

/// Work the host must perform on the controller's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPhotos,
    Store(PhotoUpload),
    PickFiles,
    ToggleFullscreen,
}

/// What a tick changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub advanced: bool,
    pub hidden: bool,
}

#[derive(Debug)]
pub struct Slideshow<C: Clock> {
    carousel: Carousel,
    playback: PlaybackTimer,
    visibility: VisibilityTimer,
    uploads: UploadPipeline,
    clock: C,
}

impl<C: Clock> Slideshow<C> {
    /// Create the session and the effects for the initial load
    pub fn new(settings: &Settings, clock: C) -> (Self, Vec<Effect>) {
        let now = clock.now();
        let slideshow = Self {
            carousel: Carousel::new(settings.empty_list),
            playback: PlaybackTimer::new(settings.slide_interval()),
            visibility: VisibilityTimer::new(now, settings.idle_timeout()),
            uploads: UploadPipeline::new(settings.refresh),
            clock,
        };
        (slideshow, vec![Effect::FetchPhotos])
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn playback(&self) -> &PlaybackTimer {
        &self.playback
    }

    pub fn visibility(&self) -> &VisibilityTimer {
        &self.visibility
    }

    pub fn uploads(&self) -> &UploadPipeline {
        &self.uploads
    }

    pub fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        let now = self.clock.now();
        self.visibility.activity(now);

        match intent {
            Intent::Previous => {
                self.carousel.previous();
                self.playback.restart(now);
                Vec::new()
            }
            Intent::Next => {
                self.carousel.next();
                self.playback.restart(now);
                Vec::new()
            }
            Intent::TogglePlayback => {
                match self.playback.toggle(now) {
                    PlaybackState::Running => log::debug!("▶️  Playback started"),
                    PlaybackState::Stopped => log::debug!("⏸️  Playback stopped"),
                }
                Vec::new()
            }
            Intent::ToggleFullscreen => vec![Effect::ToggleFullscreen],
            Intent::OpenUpload => vec![Effect::PickFiles],
            Intent::FilesSelected(files) => {
                let plan = self.uploads.plan(files);
                log::info!(
                    "📤 Uploading {} photos ({} skipped)",
                    plan.accepted.len(),
                    plan.skipped.len()
                );
                plan.accepted.into_iter().map(Effect::Store).collect()
            }
            Intent::Activity => Vec::new(),
        }
    }

    /// Fire whatever deadlines have passed by `now`
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let advanced = self.playback.poll(now);
        if advanced {
            self.carousel.next();
        }

        TickOutcome {
            advanced,
            hidden: self.visibility.poll(now),
        }
    }

    /// Apply a finished list request. A failed fetch leaves the carousel as is.
    pub fn photos_listed(
        &mut self,
        result: Result<Vec<String>, SlideshowError>,
    ) -> Option<RebuildOutcome> {
        match result {
            Ok(references) => {
                let outcome = self.carousel.rebuild(references);
                match outcome {
                    RebuildOutcome::Replaced(count) => log::info!("📸 Showing {count} photos"),
                    RebuildOutcome::Retained => {
                        log::warn!("⚠️  Store returned no photos, keeping current slides")
                    }
                    RebuildOutcome::Cleared => log::info!("Store returned no photos, slides cleared"),
                }
                Some(outcome)
            }
            Err(e) => {
                log::error!("❌ Error loading photos: {e}");
                None
            }
        }
    }

    /// Apply a finished upload, possibly asking for a fresh photo list
    pub fn photo_stored(&mut self, result: Result<StoredPhoto, SlideshowError>) -> Vec<Effect> {
        if self.uploads.complete(result) {
            vec![Effect::FetchPhotos]
        } else {
            Vec::new()
        }
    }
}
