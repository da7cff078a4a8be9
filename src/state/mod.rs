/// State management module
///
/// This module holds the slideshow's pure state machines, with no I/O:
/// - Shared data structures (data.rs)
/// - Slide sequence and navigation (carousel.rs)
/// - Automatic advancement (playback.rs)
/// - Overlay idle hiding (visibility.rs)
/// - Time source and timer slots (clock.rs)
/// - User settings (settings.rs)

pub mod carousel;
pub mod clock;
pub mod data;
pub mod playback;
pub mod settings;
pub mod visibility;
