//! Static configuration: storage keys, defaults, and where the API lives.

#[cfg(target_arch = "wasm32")]
use web_sys::window;

pub const VOLUME_KEY: &str = "volume";
pub const SUBTITLE_KEY: &str = "subtitle";
pub const AUTOPLAY_KEY: &str = "autoplay";
pub const THEME_KEY: &str = "theme";

pub const DEFAULT_VOLUME: f64 = 1.0;

/// How often the player checks whether the browser has enumerated the text
/// tracks of a freshly loaded video.
pub const TRACK_POLL_INTERVAL_MS: u32 = 50;
/// Upper bound on readiness checks before the stored subtitle is applied anyway.
pub const TRACK_POLL_ATTEMPTS: u32 = 40;

/// DOM id of the active `<video>` element.
pub const VIDEO_ELEMENT_ID: &str = "wallplayer-video";

/// Location of the video server's HTTP API.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiConfig {
    /// Scheme + host prefix for every endpoint. Empty means "same origin,
    /// relative URLs".
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the API base for the running page.
    ///
    /// In the browser this is the page origin, so fetches get an absolute
    /// URL. Elsewhere the base stays empty.
    #[cfg(target_arch = "wasm32")]
    pub fn from_environment() -> Self {
        let origin = window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        Self::new(origin)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_environment() -> Self {
        Self::default()
    }
}
