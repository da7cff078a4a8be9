/// Slideshow views
///
/// - Active slide surface (slide.rs)
/// - Controls overlay (overlay.rs)

pub mod overlay;
pub mod slide;
