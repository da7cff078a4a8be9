/// Slideshow settings
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/photo-slideshow/settings.json
/// - macOS: ~/Library/Application Support/photo-slideshow/settings.json
/// - Windows: %APPDATA%\photo-slideshow\settings.json
///
/// Every field has a default, so a partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `server_url`
pub const SERVER_URL_ENV: &str = "PHOTO_SLIDESHOW_URL";

/// What a rebuild does when the store reports no photos
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyListPolicy {
    /// Keep the current slides (store assumed transiently empty)
    #[default]
    Retain,
    /// Drop every slide
    Clear,
}

/// When a successful upload refreshes the carousel
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshMode {
    /// One list + rebuild per accepted file
    #[default]
    PerUpload,
    /// A single list + rebuild once every outstanding upload has completed
    AfterBatch,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    // ========== Photo store ==========

    /// Base URL of the photo store (e.g., "http://photoframe.local:8000")
    pub server_url: String,
    /// Endpoint returning the JSON array of photo references
    pub list_path: String,
    /// Endpoint accepting multipart uploads
    pub upload_path: String,
    /// Endpoint answering 2xx when the store is reachable
    pub health_path: String,

    // ========== Timing ==========

    /// Delay between automatic slide advances
    pub slide_interval_ms: u64,
    /// Inactivity before the controls overlay hides
    pub idle_timeout_ms: u64,

    // ========== Policies ==========
    pub empty_list: EmptyListPolicy,
    pub refresh: RefreshMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            list_path: "/photos".to_string(),
            upload_path: "/upload".to_string(),
            health_path: "/online".to_string(),
            slide_interval_ms: 5000,
            idle_timeout_ms: 3000,
            empty_list: EmptyListPolicy::Retain,
            refresh: RefreshMode::PerUpload,
        }
    }
}

impl Settings {
    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Convert to pretty JSON for writing a settings file by hand
    #[cfg(test)]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from the default location, falling back to defaults.
    ///
    /// A broken settings file is logged, never fatal.
    pub fn load_or_default() -> Self {
        let mut settings = match Self::settings_path() {
            Some(path) => match Self::load_from(&path) {
                Ok(Some(settings)) => {
                    log::info!("⚙️  Loaded settings from {}", path.display());
                    settings
                }
                Ok(None) => Self::default(),
                Err(e) => {
                    log::warn!("⚠️  {e}; using default settings");
                    Self::default()
                }
            },
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            settings.server_url = url;
        }
        settings.server_url = normalize_base_url(&settings.server_url);
        settings
    }

    /// Read a settings file; `Ok(None)` if it does not exist
    pub fn load_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&json)
            .map(Some)
            .map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Get the path where the settings file is expected
    fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("photo-slideshow");
        path.push("settings.json");
        Some(path)
    }

    pub fn slide_interval(&self) -> Duration {
        Duration::from_millis(self.slide_interval_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

/// Add a scheme if missing and drop trailing slashes.
/// "localhost:8000/" becomes "http://localhost:8000".
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
