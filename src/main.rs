use env_logger::{Builder, Target};
use iced::widget::image::Handle;
use iced::widget::stack;
use iced::{event, time, window, Element, Subscription, Task, Theme};
use log::LevelFilter;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

mod controller;
mod state;
mod store;
mod ui;

use controller::{input, Effect, Intent, Slideshow};
use state::carousel::RebuildOutcome;
use state::clock::SystemClock;
use state::data::{PhotoUpload, Slide, StoredPhoto};
use state::settings::Settings;
use store::{media, HttpPhotoStore, PhotoStore, SlideshowError};
use ui::overlay::OverlayStatus;

/// How often timer deadlines are checked
const TICK_RATE: Duration = Duration::from_millis(100);

/// Main application state
struct PhotoSlideshow {
    /// Carousel, playback and overlay state machines
    slideshow: Slideshow<SystemClock>,
    /// The remote photo store
    store: Arc<dyn PhotoStore>,
    /// Decoded-on-demand image handles, keyed by reference
    images: HashMap<String, Handle>,
    /// Health check answer (None until it arrives)
    online: Option<bool>,
    /// Local time of the last successful photo list
    synced_at: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User input routed to the controller (buttons, keys, pointer)
    Input(Intent),
    /// Periodic tick driving playback and overlay deadlines
    Tick(Instant),
    /// Photo list request finished
    PhotosListed(Result<Vec<String>, SlideshowError>),
    /// One upload finished
    PhotoStored(Result<StoredPhoto, SlideshowError>),
    /// File picker closed (empty if cancelled)
    FilesPicked(Vec<PhotoUpload>),
    /// Image bytes for a reference arrived
    ImageLoaded(String, Result<Vec<u8>, SlideshowError>),
    /// Health check finished
    StoreChecked(bool),
    /// Fullscreen could not be toggled
    FullscreenFailed(SlideshowError),
}

impl PhotoSlideshow {
    /// Create a new instance of the application
    fn new(settings: Settings) -> (Self, Task<Message>) {
        let store: Arc<dyn PhotoStore> = Arc::new(HttpPhotoStore::new(&settings));
        let (slideshow, effects) = Slideshow::new(&settings, SystemClock);

        let app = PhotoSlideshow {
            slideshow,
            store,
            images: HashMap::new(),
            online: None,
            synced_at: None,
        };

        let store = app.store.clone();
        let check = Task::perform(async move { store.online().await }, Message::StoreChecked);
        let startup = app.run_effects(effects);

        (app, Task::batch([check, startup]))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Input(intent) => {
                let effects = self.slideshow.dispatch(intent);
                self.run_effects(effects)
            }
            Message::Tick(now) => {
                let outcome = self.slideshow.tick(now);
                if outcome.advanced {
                    log::debug!("⏭️  Advanced to slide {:?}", self.slideshow.carousel().current_index());
                }
                if outcome.hidden {
                    log::debug!("Controls hidden after inactivity");
                }
                Task::none()
            }
            Message::PhotosListed(result) => match self.slideshow.photos_listed(result) {
                Some(outcome) => {
                    self.synced_at = Some(chrono::Local::now().format("%H:%M:%S").to_string());
                    match outcome {
                        RebuildOutcome::Retained => Task::none(),
                        RebuildOutcome::Replaced(_) | RebuildOutcome::Cleared => self.load_images(),
                    }
                }
                None => Task::none(),
            },
            Message::PhotoStored(result) => {
                let effects = self.slideshow.photo_stored(result);
                self.run_effects(effects)
            }
            Message::FilesPicked(files) => {
                let effects = self.slideshow.dispatch(Intent::FilesSelected(files));
                self.run_effects(effects)
            }
            Message::ImageLoaded(reference, result) => {
                match result {
                    // A rebuild may have dropped this reference while it was downloading
                    Ok(bytes) if is_listed(self.slideshow.carousel().slides(), &reference) => {
                        self.images.insert(reference, Handle::from_bytes(bytes));
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("⚠️  {e}"),
                }
                Task::none()
            }
            Message::StoreChecked(online) => {
                if online {
                    log::info!("✅ Photo store is online");
                } else {
                    log::warn!("⚠️  Photo store did not answer its health check");
                }
                self.online = Some(online);
                Task::none()
            }
            Message::FullscreenFailed(e) => {
                log::warn!("⚠️  Error attempting to toggle fullscreen: {e}");
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let slide = ui::slide::slide_view(self.slideshow.carousel(), &self.images);

        if self.slideshow.visibility().is_visible() {
            stack![slide, ui::overlay::controls(self.overlay_status())].into()
        } else {
            slide
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            time::every(TICK_RATE).map(Message::Tick),
            event::listen_with(input::route_event).map(Message::Input),
        ])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn overlay_status(&self) -> OverlayStatus {
        let carousel = self.slideshow.carousel();
        OverlayStatus {
            playback_label: self.slideshow.playback().label(),
            position: carousel.current_index().map(|i| (i + 1, carousel.len())),
            online: self.online,
            synced_at: self.synced_at.clone(),
            uploading: self.slideshow.uploads().in_flight(),
        }
    }

    /// Drop handles for references no longer listed and fetch the new ones
    fn load_images(&mut self) -> Task<Message> {
        let missing = prune_and_missing(&mut self.images, self.slideshow.carousel().slides());

        Task::batch(missing.into_iter().map(|reference| {
            let store = self.store.clone();
            Task::perform(
                async move {
                    let result = store.fetch(&reference).await;
                    (reference, result)
                },
                |(reference, result)| Message::ImageLoaded(reference, result),
            )
        }))
    }

    fn run_effects(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(effects.into_iter().map(|effect| self.perform(effect)))
    }

    /// Turn a controller effect into a runtime task
    fn perform(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FetchPhotos => {
                let store = self.store.clone();
                Task::perform(async move { store.list().await }, Message::PhotosListed)
            }
            Effect::Store(upload) => {
                let store = self.store.clone();
                Task::perform(async move { store.store(upload).await }, Message::PhotoStored)
            }
            Effect::PickFiles => Task::perform(pick_photos(), Message::FilesPicked),
            Effect::ToggleFullscreen => toggle_fullscreen(),
        }
    }
}

/// Show the native file picker and read every selected file
async fn pick_photos() -> Vec<PhotoUpload> {
    let Some(handles) = rfd::AsyncFileDialog::new()
        .set_title("Select photos to upload")
        .add_filter("Photos", &media::PHOTO_EXTENSIONS)
        .pick_files()
        .await
    else {
        return Vec::new();
    };

    let mut uploads = Vec::with_capacity(handles.len());
    for handle in handles {
        let file_name = handle.file_name();
        match tokio::fs::read(handle.path()).await {
            Ok(bytes) => {
                let media_type = media::media_type_for(&file_name);
                uploads.push(PhotoUpload::new(file_name, media_type, bytes));
            }
            Err(e) => log::error!("❌ Failed to read {}: {e}", handle.path().display()),
        }
    }
    uploads
}

fn is_listed(slides: &[Slide], reference: &str) -> bool {
    slides.iter().any(|slide| slide.reference() == reference)
}

/// Evict cached handles whose reference is gone; return the references
/// still to be fetched, in slide order
fn prune_and_missing(images: &mut HashMap<String, Handle>, slides: &[Slide]) -> Vec<String> {
    let listed: HashSet<&str> = slides.iter().map(|slide| slide.reference()).collect();
    images.retain(|reference, _| listed.contains(reference.as_str()));

    let mut missing = Vec::new();
    for slide in slides {
        let reference = slide.reference();
        if !images.contains_key(reference) && !missing.iter().any(|m| m == reference) {
            missing.push(reference.to_string());
        }
    }
    missing
}

/// Fullscreen leaves to windowed; any other mode enters fullscreen
fn next_mode(mode: window::Mode) -> window::Mode {
    match mode {
        window::Mode::Fullscreen => window::Mode::Windowed,
        _ => window::Mode::Fullscreen,
    }
}

/// Enter fullscreen if windowed, leave it otherwise
fn toggle_fullscreen() -> Task<Message> {
    window::get_latest().then(|id| match id {
        Some(id) => window::get_mode(id).then(move |mode| window::change_mode(id, next_mode(mode))),
        None => Task::done(Message::FullscreenFailed(SlideshowError::Fullscreen(
            "no window to toggle".to_string(),
        ))),
    })
}

fn init_logger() {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
        return;
    }

    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("photo_slideshow", LevelFilter::Debug)
        .init();
}

fn main() -> iced::Result {
    init_logger();

    let settings = Settings::load_or_default();
    log::info!(
        "🎞️  Photo Slideshow starting ({}ms per slide)",
        settings.slide_interval_ms
    );

    iced::application("Photo Slideshow", PhotoSlideshow::update, PhotoSlideshow::view)
        .subscription(PhotoSlideshow::subscription)
        .theme(PhotoSlideshow::theme)
        .centered()
        .run_with(move || PhotoSlideshow::new(settings))
}
