//! User settings stored as settings.json in the app data directory

use crate::collaborators::{SettingsSnapshot, SettingsStore, StaticFlags};
use crate::constants::{DEFAULT_SUGGESTIONS_URL, DEFAULT_WEBAPP_URL};
use crate::types::{Density, SearchVariant};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Cards per row for each density tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumCards {
    pub eco: u8,
    pub cozy: u8,
    pub roomy: u8,
}

impl Default for NumCards {
    fn default() -> Self {
        Self {
            eco: 4,
            cozy: 3,
            roomy: 3,
        }
    }
}

impl NumCards {
    pub fn get(&self, density: Density) -> u8 {
        match density {
            Density::Eco => self.eco,
            Density::Cozy => self.cozy,
            Density::Roomy => self.roomy,
        }
    }

    pub fn to_map(self) -> HashMap<Density, u8> {
        Density::ALL.iter().map(|&d| (d, self.get(d))).collect()
    }
}

/// Unknown density names fall back to Eco instead of rejecting the file
fn lenient_density<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Density, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(match name.as_str() {
        "cozy" => Density::Cozy,
        "roomy" => Density::Roomy,
        "eco" => Density::Eco,
        other => {
            warn!(density = other, "Unknown density in settings, using eco");
            Density::Eco
        }
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Feed layout
    #[serde(deserialize_with = "lenient_density")]
    pub density: Density,
    pub list_mode: bool,
    pub num_cards: NumCards,

    // Experiments
    pub search_variant: SearchVariant,
    pub feed_layout_v1: bool,
    pub show_search: bool,

    // Endpoints
    pub webapp_url: String,
    pub suggestions_url: String,

    // Accessibility
    pub reduce_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            density: Density::Eco,
            list_mode: false,
            num_cards: NumCards::default(),
            search_variant: SearchVariant::Control,
            feed_layout_v1: false,
            show_search: true,
            webapp_url: DEFAULT_WEBAPP_URL.to_string(),
            suggestions_url: DEFAULT_SUGGESTIONS_URL.to_string(),
            reduce_motion: false,
        }
    }
}

impl Settings {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("settings.json")
    }

    pub fn load(data_dir: &Path) -> Self {
        let path = Self::path(data_dir);
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = Self::path(data_dir);
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            density: self.density,
            list_mode_preferred: self.list_mode,
            loaded: true,
            num_cards_by_density: self.num_cards.to_map(),
        }
    }

    pub fn flags(&self) -> StaticFlags {
        StaticFlags {
            search: self.search_variant,
            feed_layout_v1: self.feed_layout_v1,
        }
    }
}

/// Settings store that reports "not loaded" until a background load lands
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<Mutex<Option<Settings>>>,
}

impl SharedSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(settings: Settings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(settings))),
        }
    }

    /// Read settings.json on a worker thread, then run `on_loaded`
    pub fn load_in_background(&self, data_dir: PathBuf, on_loaded: impl FnOnce() + Send + 'static) {
        let inner = self.inner.clone();
        std::thread::spawn(move || {
            let settings = Settings::load(&data_dir);
            if let Ok(mut slot) = inner.lock() {
                *slot = Some(settings);
            }
            on_loaded();
        });
    }

    pub fn get(&self) -> Option<Settings> {
        self.inner.lock().ok().and_then(|s| s.clone())
    }

    /// Apply a change to the loaded settings. No-op before loading finishes.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> Option<Settings> {
        let mut slot = self.inner.lock().ok()?;
        let settings = slot.as_mut()?;
        f(settings);
        Some(settings.clone())
    }
}

impl SettingsStore for SharedSettings {
    fn snapshot(&self) -> SettingsSnapshot {
        self.get()
            .map(|s| s.snapshot())
            .unwrap_or_else(SettingsSnapshot::not_loaded)
    }
}
