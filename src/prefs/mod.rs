//! Durable user preferences (volume, subtitle language, autoplay, theme).
//!
//! Values are stored as plain strings under fixed keys so they survive page
//! reloads. Parsing never fails: anything missing or malformed reads back as
//! the default.

use crate::config::{AUTOPLAY_KEY, DEFAULT_VOLUME, SUBTITLE_KEY, THEME_KEY, VOLUME_KEY};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

/// Raw key-value persistence.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Window `localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(key, value) {
            tracing::debug!(key, ?err, "failed to persist preference");
        }
    }
}

/// In-process store used by native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::default();
        for (key, value) in values {
            store.set(key, value);
        }
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(target_arch = "wasm32")]
pub type DefaultStore = BrowserStore;
#[cfg(not(target_arch = "wasm32"))]
pub type DefaultStore = MemoryStore;

/// Subtitle preference: a language code or explicitly off.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubtitleChoice {
    #[default]
    Off,
    Language(String),
}

impl SubtitleChoice {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == "off" {
            Self::Off
        } else {
            Self::Language(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Off => "off",
            Self::Language(lang) => lang,
        }
    }

    /// Text shown on the subtitle button.
    pub fn label(&self) -> String {
        match self {
            Self::Off => "OFF".to_string(),
            Self::Language(lang) => lang.to_uppercase(),
        }
    }
}

impl fmt::Display for SubtitleChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Glyph for the toggle button: it shows the theme you would switch to.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "dark_mode",
            Self::Dark => "light_mode",
        }
    }
}

/// Clamp a volume to the range a media element accepts.
pub fn normalize_volume(value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_VOLUME;
    }
    value.clamp(0.0, 1.0)
}

/// Typed view over a [`PreferenceStore`].
pub struct Preferences<S: PreferenceStore = DefaultStore> {
    store: Rc<S>,
}

impl<S: PreferenceStore> Clone for Preferences<S> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
        }
    }
}

impl<S: PreferenceStore> PartialEq for Preferences<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

impl Preferences<DefaultStore> {
    pub fn open() -> Self {
        Self::new(DefaultStore::default())
    }
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Rc::new(store),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn volume(&self) -> f64 {
        self.store
            .get(VOLUME_KEY)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .map(normalize_volume)
            .unwrap_or(DEFAULT_VOLUME)
    }

    pub fn set_volume(&self, volume: f64) {
        self.store
            .set(VOLUME_KEY, &normalize_volume(volume).to_string());
    }

    pub fn subtitle(&self) -> SubtitleChoice {
        self.store
            .get(SUBTITLE_KEY)
            .map(|raw| SubtitleChoice::parse(&raw))
            .unwrap_or_default()
    }

    pub fn set_subtitle(&self, choice: &SubtitleChoice) {
        self.store.set(SUBTITLE_KEY, choice.as_str());
    }

    pub fn autoplay(&self) -> bool {
        self.store.get(AUTOPLAY_KEY).as_deref() == Some("true")
    }

    pub fn set_autoplay(&self, enabled: bool) {
        self.store
            .set(AUTOPLAY_KEY, if enabled { "true" } else { "false" });
    }

    pub fn theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .map(|raw| Theme::parse(&raw))
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_str());
    }
}
