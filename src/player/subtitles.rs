//! Subtitle menu state and its reconciliation with the media element's text
//! tracks.
//!
//! The menu never trusts the last requested language: after every change the
//! label and the stored preference are recomputed from which track is really
//! showing.

use crate::api::SubtitleTrack;
use crate::prefs::{PreferenceStore, Preferences, SubtitleChoice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMode {
    Showing,
    Hidden,
    Disabled,
}

/// The text tracks of the active media element.
pub trait TextTrackSet {
    fn len(&self) -> usize;
    fn language(&self, index: usize) -> Option<String>;
    fn mode(&self, index: usize) -> Option<TrackMode>;
    fn set_mode(&mut self, index: usize, mode: TrackMode);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Language of the first showing track, if any.
    fn showing(&self) -> Option<String> {
        (0..self.len())
            .find(|&i| self.mode(i) == Some(TrackMode::Showing))
            .and_then(|i| self.language(i))
    }
}

/// Label shown while the loaded video has no subtitles.
pub const UNAVAILABLE_LABEL: &str = "NA";

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub label: String,
    pub choice: SubtitleChoice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleMenu {
    languages: Vec<String>,
    enabled: bool,
    label: String,
    pub open: bool,
}

impl Default for SubtitleMenu {
    /// Disabled until a video with subtitles loads.
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            enabled: false,
            label: UNAVAILABLE_LABEL.to_string(),
            open: false,
        }
    }
}

impl SubtitleMenu {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entries(&self) -> Vec<MenuEntry> {
        if !self.enabled {
            return Vec::new();
        }
        std::iter::once(MenuEntry {
            label: "Off".to_string(),
            choice: SubtitleChoice::Off,
        })
        .chain(self.languages.iter().map(|lang| MenuEntry {
            label: lang.to_uppercase(),
            choice: SubtitleChoice::Language(lang.clone()),
        }))
        .collect()
    }

    pub fn toggle_open(&mut self) {
        if self.enabled {
            self.open = !self.open;
        }
    }

    fn show(&mut self, choice: &SubtitleChoice) {
        if self.enabled {
            self.label = choice.label();
        }
    }

    /// Rebuild the menu for a freshly loaded video.
    pub fn populate<S: PreferenceStore>(&mut self, tracks: &[SubtitleTrack], prefs: &Preferences<S>) {
        self.open = false;
        if tracks.is_empty() {
            self.languages.clear();
            self.enabled = false;
            self.label = UNAVAILABLE_LABEL.to_string();
            return;
        }

        self.enabled = true;
        self.languages = tracks.iter().map(|t| t.language.clone()).collect();

        let stored = prefs.subtitle();
        let current = match &stored {
            SubtitleChoice::Language(lang) if self.languages.contains(lang) => stored.clone(),
            _ => SubtitleChoice::Off,
        };
        self.show(&current);
        if current != stored {
            prefs.set_subtitle(&current);
        }
    }

    /// Make `choice` the showing track. Falls back to off when the language
    /// is not among the tracks. Returns what actually took effect.
    pub fn select<S: PreferenceStore>(
        &mut self,
        choice: SubtitleChoice,
        tracks: &mut impl TextTrackSet,
        prefs: &Preferences<S>,
    ) -> SubtitleChoice {
        prefs.set_subtitle(&choice);

        let mut found = false;
        for i in 0..tracks.len() {
            let matches = match &choice {
                SubtitleChoice::Off => false,
                SubtitleChoice::Language(lang) => tracks.language(i).as_deref() == Some(lang),
            };
            found |= matches;
            tracks.set_mode(
                i,
                if matches {
                    TrackMode::Showing
                } else {
                    TrackMode::Disabled
                },
            );
        }

        let effective = if matches!(choice, SubtitleChoice::Language(_)) && !found {
            prefs.set_subtitle(&SubtitleChoice::Off);
            SubtitleChoice::Off
        } else {
            choice
        };

        self.show(&effective);
        self.open = false;
        effective
    }

    /// Sync label and preference with whichever track is showing right now.
    pub fn reconcile<S: PreferenceStore>(
        &mut self,
        tracks: &impl TextTrackSet,
        prefs: &Preferences<S>,
    ) -> SubtitleChoice {
        let active = tracks
            .showing()
            .map(|lang| SubtitleChoice::parse(&lang))
            .unwrap_or_default();
        self.show(&active);
        if prefs.subtitle() != active {
            prefs.set_subtitle(&active);
        }
        active
    }
}

/// In-memory tracks.
#[cfg(test)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTracks {
    pub tracks: Vec<(String, TrackMode)>,
}

#[cfg(test)]
impl MemoryTracks {
    pub fn from_languages<'a>(languages: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            tracks: languages
                .into_iter()
                .map(|lang| (lang.to_string(), TrackMode::Disabled))
                .collect(),
        }
    }
}

#[cfg(test)]
impl TextTrackSet for MemoryTracks {
    fn len(&self) -> usize {
        self.tracks.len()
    }

    fn language(&self, index: usize) -> Option<String> {
        self.tracks.get(index).map(|(lang, _)| lang.clone())
    }

    fn mode(&self, index: usize) -> Option<TrackMode> {
        self.tracks.get(index).map(|(_, mode)| *mode)
    }

    fn set_mode(&mut self, index: usize, mode: TrackMode) {
        if let Some(track) = self.tracks.get_mut(index) {
            track.1 = mode;
        }
    }
}
