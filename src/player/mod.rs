//! Player controller state.
//!
//! Everything the page toggles lives in [`PlayerState`], which components
//! hold in a `Signal`. Nothing here touches the DOM, so the control logic is
//! exercised directly by the unit tests.

pub mod nav;
pub mod playlist;
pub mod subtitles;

pub use nav::{NavMode, NavState};
pub use playlist::{Playlist, PlaylistEntry};
pub use subtitles::{SubtitleMenu, TextTrackSet, TrackMode};

use crate::api::{VideoClient, VideoResponse};
use crate::prefs::{normalize_volume, PreferenceStore, Preferences, SubtitleChoice, Theme};

/// A subtitle `<track>` of the loaded video.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleSource {
    pub language: String,
    pub src: String,
}

/// Playback state for one loaded path. Replaced wholesale on the next load.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSession {
    pub generation: u64,
    pub path: String,
    pub stream_url: String,
    pub subtitles: Vec<SubtitleSource>,
    /// Subtitle preference as it stood when the session was installed,
    /// re-applied once the browser has enumerated the tracks.
    pub restore: SubtitleChoice,
}

/// Percentage shown next to the volume icon.
pub fn volume_label(volume: f64) -> String {
    format!("{}%", (volume * 100.0).round() as i64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    generation: u64,
    session: Option<VideoSession>,
    playlist: Playlist,
    pub paused: bool,
    pub autoplay: bool,
    pub theme: Theme,
    pub volume: f64,
    pub volume_open: bool,
    pub nav: NavState,
    pub subtitles: SubtitleMenu,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            generation: 0,
            session: None,
            playlist: Playlist::default(),
            paused: true,
            autoplay: false,
            theme: Theme::default(),
            volume: crate::config::DEFAULT_VOLUME,
            volume_open: false,
            nav: NavState::default(),
            subtitles: SubtitleMenu::default(),
        }
    }
}

impl PlayerState {
    pub fn from_preferences<S: PreferenceStore>(prefs: &Preferences<S>) -> Self {
        Self {
            autoplay: prefs.autoplay(),
            theme: prefs.theme(),
            volume: prefs.volume(),
            ..Self::default()
        }
    }

    pub fn session(&self) -> Option<&VideoSession> {
        self.session.as_ref()
    }

    /// Path of the entry marked as playing.
    pub fn playing_path(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.path.as_str())
    }

    pub fn set_playlist(&mut self, playlist: Playlist) {
        self.playlist = playlist;
    }

    /// Whether `generation` is the most recent load request.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Whether `generation` belongs to the session on screen. A load that
    /// is still in flight, or one that failed, leaves the old session
    /// installed.
    pub fn is_installed(&self, generation: u64) -> bool {
        self.session.as_ref().map(|s| s.generation) == Some(generation)
    }

    /// Start a load and hand out its generation token.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Install the session for a completed metadata fetch.
    ///
    /// Returns `None` when a newer load started in the meantime; the response
    /// is then dropped.
    pub fn finish_load<S: PreferenceStore>(
        &mut self,
        generation: u64,
        path: &str,
        response: &VideoResponse,
        client: &VideoClient,
        prefs: &Preferences<S>,
    ) -> Option<&VideoSession> {
        if !self.is_current(generation) {
            return None;
        }

        let tracks = &response.info.subtitles;
        let subtitles = tracks
            .iter()
            .map(|track| SubtitleSource {
                language: track.language.clone(),
                src: client.subtitle_url(path, &track.language),
            })
            .collect();

        self.subtitles.populate(tracks, prefs);
        self.session = Some(VideoSession {
            generation,
            path: path.to_string(),
            stream_url: client.stream_url(path),
            subtitles,
            restore: prefs.subtitle(),
        });
        self.session.as_ref()
    }

    /// Subtitle to re-apply for `generation` and how many tracks to wait
    /// for first. `None` when the session is gone or subtitles were off.
    pub fn pending_subtitle(&self, generation: u64) -> Option<(SubtitleChoice, usize)> {
        let session = self.session.as_ref().filter(|s| s.generation == generation)?;
        match &session.restore {
            SubtitleChoice::Off => None,
            choice => Some((choice.clone(), session.subtitles.len())),
        }
    }

    /// Apply the captured subtitle choice to the installed session's tracks.
    pub fn restore_subtitle<S: PreferenceStore>(
        &mut self,
        generation: u64,
        tracks: &mut impl TextTrackSet,
        prefs: &Preferences<S>,
    ) -> Option<SubtitleChoice> {
        let (choice, _) = self.pending_subtitle(generation)?;
        Some(self.subtitles.select(choice, tracks, prefs))
    }

    /// Track list of `generation` changed. Ignored once another session
    /// replaced it.
    pub fn reconcile_subtitles<S: PreferenceStore>(
        &mut self,
        generation: u64,
        tracks: &impl TextTrackSet,
        prefs: &Preferences<S>,
    ) -> Option<SubtitleChoice> {
        if !self.is_installed(generation) {
            return None;
        }
        Some(self.subtitles.reconcile(tracks, prefs))
    }

    /// Called on the media `ended` event. Returns the path to load next when
    /// autoplay is on and something playable follows.
    pub fn on_ended(&mut self) -> Option<String> {
        self.paused = true;
        if !self.autoplay {
            return None;
        }
        let current = self.playing_path()?;
        self.playlist.next_after(current).map(str::to_string)
    }

    pub fn play_pause_icon(&self) -> &'static str {
        if self.paused {
            "play_arrow"
        } else {
            "pause"
        }
    }

    pub fn set_volume<S: PreferenceStore>(&mut self, volume: f64, prefs: &Preferences<S>) {
        self.volume = normalize_volume(volume);
        self.volume_open = false;
        prefs.set_volume(self.volume);
    }

    pub fn volume_label(&self) -> String {
        volume_label(self.volume)
    }

    pub fn toggle_volume_menu(&mut self) {
        self.volume_open = !self.volume_open;
    }

    pub fn toggle_autoplay<S: PreferenceStore>(&mut self, prefs: &Preferences<S>) {
        self.autoplay = !self.autoplay;
        prefs.set_autoplay(self.autoplay);
    }

    pub fn autoplay_title(&self) -> &'static str {
        if self.autoplay {
            "Autoplay ON"
        } else {
            "Autoplay OFF"
        }
    }

    pub fn toggle_theme<S: PreferenceStore>(&mut self, prefs: &Preferences<S>) {
        self.theme = self.theme.toggled();
        prefs.set_theme(self.theme);
    }

    /// Close whichever popovers the click landed outside of.
    pub fn dismiss_popovers(&mut self, inside_volume: bool, inside_subtitles: bool) {
        if !inside_volume {
            self.volume_open = false;
        }
        if !inside_subtitles {
            self.subtitles.open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SubtitleTrack, VideoInfo};
    use crate::config::ApiConfig;
    use crate::player::subtitles::MemoryTracks;
    use crate::prefs::MemoryStore;

    fn client() -> VideoClient {
        VideoClient::new(ApiConfig::default())
    }

    fn response(langs: &[&str]) -> VideoResponse {
        VideoResponse {
            path: String::new(),
            kind: "video".into(),
            info: VideoInfo {
                subtitles: langs.iter().map(|l| SubtitleTrack::new(*l)).collect(),
                ..VideoInfo::default()
            },
        }
    }

    fn playlist(entries: &[(&str, bool)]) -> Playlist {
        Playlist::new(
            entries
                .iter()
                .map(|(path, playable)| PlaylistEntry {
                    path: path.to_string(),
                    playable: *playable,
                })
                .collect(),
        )
    }

    #[test]
    fn restores_preferences_on_start() {
        let prefs = Preferences::new(MemoryStore::with_values([
            ("volume", "0.25"),
            ("autoplay", "true"),
            ("theme", "dark"),
        ]));
        let state = PlayerState::from_preferences(&prefs);
        assert_eq!(state.volume, 0.25);
        assert_eq!(state.volume_label(), "25%");
        assert!(state.autoplay);
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.subtitles.label(), "NA");
    }

    #[test]
    fn volume_label_rounds_to_whole_percent() {
        for (volume, label) in [(0.0, "0%"), (0.333, "33%"), (0.07, "7%"), (1.0, "100%")] {
            assert_eq!(volume_label(volume), label);
        }
    }

    #[test]
    fn setting_volume_persists_and_closes_menu() {
        let prefs = Preferences::new(MemoryStore::default());
        let mut state = PlayerState::default();
        state.toggle_volume_menu();
        state.set_volume(0.6, &prefs);
        assert!(!state.volume_open);
        assert_eq!(prefs.volume(), 0.6);
        assert_eq!(state.volume_label(), "60%");
    }

    #[test]
    fn load_builds_session_and_subtitle_menu() {
        let prefs = Preferences::new(MemoryStore::default());
        let mut state = PlayerState::default();
        let generation = state.begin_load();

        let session = state
            .finish_load(generation, "a.mp4", &response(&["en"]), &client(), &prefs)
            .cloned()
            .unwrap();

        assert_eq!(session.stream_url, "/api/video/stream?path=a.mp4");
        assert_eq!(
            session.subtitles,
            vec![SubtitleSource {
                language: "en".into(),
                src: "/api/video/subtitle?path=a.mp4&lang=en".into(),
            }]
        );
        let labels: Vec<_> = state.subtitles.entries().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, ["Off", "EN"]);
        assert_eq!(state.playing_path(), Some("a.mp4"));
    }

    #[test]
    fn only_latest_load_is_installed() {
        let prefs = Preferences::new(MemoryStore::default());
        let mut state = PlayerState::default();
        let first = state.begin_load();
        let second = state.begin_load();

        assert!(state
            .finish_load(first, "old.mp4", &response(&[]), &client(), &prefs)
            .is_none());
        assert!(state.session().is_none());
        assert!(!state.is_current(first));

        state.finish_load(second, "new.mp4", &response(&[]), &client(), &prefs);
        assert_eq!(state.playing_path(), Some("new.mp4"));
        assert!(state.is_current(second));
    }

    #[test]
    fn new_load_replaces_playing_marker() {
        let prefs = Preferences::new(MemoryStore::default());
        let mut state = PlayerState::default();
        let g = state.begin_load();
        state.finish_load(g, "/a.mp4", &response(&["en"]), &client(), &prefs);
        let g = state.begin_load();
        state.finish_load(g, "/b.mp4", &response(&[]), &client(), &prefs);

        assert_eq!(state.playing_path(), Some("/b.mp4"));
        assert_eq!(state.session().map(|s| s.generation), Some(g));
        assert!(!state.subtitles.is_enabled());
    }

    #[test]
    fn stored_subtitle_survives_a_load_that_has_it() {
        let prefs = Preferences::new(MemoryStore::with_values([("subtitle", "fr")]));
        let mut state = PlayerState::default();
        let g = state.begin_load();
        state.finish_load(g, "/a.mp4", &response(&["en", "fr"]), &client(), &prefs);
        assert_eq!(state.subtitles.label(), "FR");
        assert_eq!(prefs.subtitle(), SubtitleChoice::Language("fr".into()));
    }

    #[test]
    fn ended_advances_only_with_autoplay() {
        let prefs = Preferences::new(MemoryStore::default());
        let mut state = PlayerState::default();
        state.set_playlist(playlist(&[("/a.mp4", true), ("/dir", false), ("/b.mp4", true)]));
        let g = state.begin_load();
        state.finish_load(g, "/a.mp4", &response(&[]), &client(), &prefs);
        state.paused = false;

        assert_eq!(state.on_ended(), None);
        assert!(state.paused);

        state.toggle_autoplay(&prefs);
        assert_eq!(state.on_ended().as_deref(), Some("/b.mp4"));
        assert!(prefs.autoplay());
    }

    #[test]
    fn ended_on_last_entry_stops() {
        let prefs = Preferences::new(MemoryStore::with_values([("autoplay", "true")]));
        let mut state = PlayerState::from_preferences(&prefs);
        state.set_playlist(playlist(&[("/a.mp4", true), ("/b.mp4", true)]));
        let g = state.begin_load();
        state.finish_load(g, "/b.mp4", &response(&[]), &client(), &prefs);
        assert_eq!(state.on_ended(), None);
    }

    #[test]
    fn autoplay_button_text() {
        let prefs = Preferences::new(MemoryStore::default());
        let mut state = PlayerState::default();
        assert_eq!(state.autoplay_title(), "Autoplay OFF");
        state.toggle_autoplay(&prefs);
        assert_eq!(state.autoplay_title(), "Autoplay ON");
        assert_eq!(prefs.store().get("autoplay").as_deref(), Some("true"));
    }

    #[test]
    fn theme_toggle_persists() {
        let prefs = Preferences::new(MemoryStore::default());
        let mut state = PlayerState::from_preferences(&prefs);
        assert_eq!(state.theme, Theme::Light);
        state.toggle_theme(&prefs);
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(prefs.store().get("theme").as_deref(), Some("dark"));
        state.toggle_theme(&prefs);
        assert_eq!(prefs.store().get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn outside_clicks_close_popovers() {
        let prefs = Preferences::new(MemoryStore::default());
        let mut state = PlayerState::default();
        let g = state.begin_load();
        state.finish_load(g, "/a.mp4", &response(&["en"]), &client(), &prefs);
        state.volume_open = true;
        state.subtitles.open = true;

        state.dismiss_popovers(true, false);
        assert!(state.volume_open);
        assert!(!state.subtitles.open);

        state.dismiss_popovers(false, false);
        assert!(!state.volume_open);
    }

    #[test]
    fn play_pause_icon_tracks_paused_flag() {
        let mut state = PlayerState::default();
        assert_eq!(state.play_pause_icon(), "play_arrow");
        state.paused = false;
        assert_eq!(state.play_pause_icon(), "pause");
    }

    fn installed(prefs: &Preferences<MemoryStore>, path: &str, langs: &[&str]) -> (PlayerState, u64) {
        let mut state = PlayerState::default();
        let g = state.begin_load();
        state.finish_load(g, path, &response(langs), &client(), prefs);
        (state, g)
    }

    #[test]
    fn failed_load_keeps_session_installed() {
        let prefs = Preferences::new(MemoryStore::default());
        let (mut state, g) = installed(&prefs, "/a.mp4", &["en", "fr"]);

        // Next fetch never completes.
        let pending = state.begin_load();
        assert!(!state.is_current(g));
        assert!(state.is_installed(g));
        assert!(!state.is_installed(pending));
        assert_eq!(state.playing_path(), Some("/a.mp4"));

        let mut tracks = MemoryTracks::from_languages(["en", "fr"]);
        tracks.tracks[1].1 = TrackMode::Showing;
        assert_eq!(
            state.reconcile_subtitles(g, &tracks, &prefs),
            Some(SubtitleChoice::Language("fr".into()))
        );
        assert_eq!(state.subtitles.label(), "FR");
        assert_eq!(prefs.subtitle(), SubtitleChoice::Language("fr".into()));
    }

    #[test]
    fn replaced_session_ignores_track_events() {
        let prefs = Preferences::new(MemoryStore::with_values([("subtitle", "en")]));
        let (mut state, old) = installed(&prefs, "/a.mp4", &["en"]);
        let new = state.begin_load();
        state.finish_load(new, "/b.mp4", &response(&["en"]), &client(), &prefs);

        let mut tracks = MemoryTracks::from_languages(["en"]);
        assert_eq!(state.reconcile_subtitles(old, &tracks, &prefs), None);
        assert_eq!(state.restore_subtitle(old, &mut tracks, &prefs), None);
        assert_eq!(tracks.tracks[0].1, TrackMode::Disabled);
        assert_eq!(prefs.subtitle(), SubtitleChoice::Language("en".into()));
    }

    #[test]
    fn stored_subtitle_restored_after_tracks_are_added() {
        let prefs = Preferences::new(MemoryStore::with_values([("subtitle", "en")]));
        let (mut state, g) = installed(&prefs, "/a.mp4", &["en", "fr"]);
        assert_eq!(
            state.pending_subtitle(g),
            Some((SubtitleChoice::Language("en".into()), 2))
        );

        // Freshly added tracks are all disabled; the addtrack reconcile
        // writes "off" before metadata arrives.
        let mut tracks = MemoryTracks::from_languages(["en", "fr"]);
        state.reconcile_subtitles(g, &tracks, &prefs);
        assert_eq!(prefs.subtitle(), SubtitleChoice::Off);

        assert_eq!(
            state.restore_subtitle(g, &mut tracks, &prefs),
            Some(SubtitleChoice::Language("en".into()))
        );
        assert_eq!(tracks.tracks[0].1, TrackMode::Showing);
        assert_eq!(tracks.tracks[1].1, TrackMode::Disabled);
        assert_eq!(state.subtitles.label(), "EN");
        assert_eq!(prefs.subtitle(), SubtitleChoice::Language("en".into()));
    }

    #[test]
    fn restore_survives_a_failed_follow_up_load() {
        let prefs = Preferences::new(MemoryStore::with_values([("subtitle", "fr")]));
        let (mut state, g) = installed(&prefs, "/a.mp4", &["en", "fr"]);
        state.begin_load();

        let mut tracks = MemoryTracks::from_languages(["en", "fr"]);
        assert_eq!(
            state.restore_subtitle(g, &mut tracks, &prefs),
            Some(SubtitleChoice::Language("fr".into()))
        );
        assert_eq!(tracks.tracks[1].1, TrackMode::Showing);
    }

    #[test]
    fn nothing_to_restore_when_subtitles_were_off() {
        let prefs = Preferences::new(MemoryStore::default());
        let (mut state, g) = installed(&prefs, "/a.mp4", &["en"]);
        assert_eq!(state.pending_subtitle(g), None);

        let mut tracks = MemoryTracks::from_languages(["en"]);
        assert_eq!(state.restore_subtitle(g, &mut tracks, &prefs), None);
        assert_eq!(tracks.tracks[0].1, TrackMode::Disabled);
    }

    #[test]
    fn restore_captures_corrected_preference() {
        let prefs = Preferences::new(MemoryStore::with_values([("subtitle", "de")]));
        let (state, g) = installed(&prefs, "/a.mp4", &["en"]);
        assert_eq!(state.session().map(|s| s.restore.clone()), Some(SubtitleChoice::Off));
        assert_eq!(state.pending_subtitle(g), None);
    }
}
