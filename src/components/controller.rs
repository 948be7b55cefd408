use crate::api::{Listing, VideoClient};
use crate::components::media;
use crate::player::{PlayerState, Playlist};
use crate::prefs::{Preferences, SubtitleChoice};
use dioxus::prelude::*;
use tracing::{debug, info, warn};

/// Handle shared through context. Owns the player state signal and performs
/// every side effect (fetches, media element calls, persistence) on its
/// behalf.
#[derive(Clone, PartialEq)]
pub struct PlayerController {
    state: Signal<PlayerState>,
    listing: Signal<Listing>,
    prefs: Preferences,
    client: VideoClient,
}

impl PlayerController {
    pub fn new(
        state: Signal<PlayerState>,
        listing: Signal<Listing>,
        prefs: Preferences,
        client: VideoClient,
    ) -> Self {
        Self {
            state,
            listing,
            prefs,
            client,
        }
    }

    pub fn state(&self) -> Signal<PlayerState> {
        self.state
    }

    pub fn listing(&self) -> Signal<Listing> {
        self.listing
    }

    pub fn client(&self) -> &VideoClient {
        &self.client
    }

    /// Fetch metadata for `path` and swap in a new video session.
    ///
    /// A failed fetch leaves the current video playing; a fetch that
    /// resolves after a newer load started is dropped.
    pub fn load_video(&self, path: String) {
        let mut state = self.state;
        let generation = state.write().begin_load();
        info!(path = %path, generation, "loading video");

        let this = self.clone();
        spawn(async move {
            let response = match this.client.fetch_video(&path).await {
                Ok(response) => response,
                Err(err) => {
                    warn!(error = %err, path = %path, "video info unavailable");
                    return;
                }
            };

            let mut state = this.state;
            let installed = state
                .write()
                .finish_load(generation, &path, &response, &this.client, &this.prefs)
                .is_some();
            if !installed {
                debug!(path = %path, generation, "discarding superseded load");
            }
        });
    }

    /// List `dir` in the file browser and use it as the autoplay order.
    pub fn open_directory(&self, dir: String) {
        let this = self.clone();
        spawn(async move {
            match this.client.fetch_listing(&dir).await {
                Ok(listing) => {
                    let mut state = this.state;
                    let mut listing_signal = this.listing;
                    state
                        .write()
                        .set_playlist(Playlist::from_items(&listing.items));
                    listing_signal.set(listing);
                }
                Err(err) => warn!(error = %err, dir = %dir, "directory listing unavailable"),
            }
        });
    }

    /// The `<video>` for `generation` is in the document. The returned
    /// listeners stay attached for as long as the caller keeps them.
    pub fn on_video_mounted(&self, generation: u64) -> Option<media::TrackListeners> {
        let mut state = self.state;
        if !state.peek().is_installed(generation) {
            return None;
        }
        media::apply_volume(state.peek().volume);
        if let Some(paused) = media::is_paused() {
            state.write().paused = paused;
        }
        media::attach_track_listeners(self.clone(), generation)
    }

    /// Re-apply the subtitle captured when the session was installed, once
    /// the browser has enumerated the new video's tracks.
    pub fn on_metadata_loaded(&self, generation: u64) {
        let Some((choice, expected)) = self.state.peek().pending_subtitle(generation) else {
            return;
        };

        let this = self.clone();
        spawn(async move {
            if !media::wait_for_text_tracks(expected).await {
                debug!(generation, expected, "text tracks not enumerated in time");
            }
            let Some(mut tracks) = media::text_tracks() else {
                return;
            };
            let mut state = this.state;
            match state
                .write()
                .restore_subtitle(generation, &mut tracks, &this.prefs)
            {
                Some(applied) if applied != choice => {
                    debug!(requested = %choice, "stored subtitle not in this video")
                }
                Some(_) => {}
                None => debug!(generation, "skipping subtitle restore for a replaced video"),
            };
        });
    }

    pub fn select_subtitle(&self, choice: SubtitleChoice) {
        let mut state = self.state;
        let Some(mut tracks) = media::text_tracks() else {
            state.write().subtitles.open = false;
            return;
        };
        let effective = state
            .write()
            .subtitles
            .select(choice.clone(), &mut tracks, &self.prefs);
        if effective != choice {
            debug!(requested = %choice, "subtitle language not in this video");
        }
    }

    pub fn reconcile_subtitles(&self, generation: u64) {
        let mut state = self.state;
        if !state.peek().is_installed(generation) {
            return;
        }
        if let Some(tracks) = media::text_tracks() {
            state
                .write()
                .reconcile_subtitles(generation, &tracks, &self.prefs);
        }
    }

    pub fn on_play(&self) {
        let mut state = self.state;
        state.write().paused = false;
    }

    pub fn on_pause(&self) {
        let mut state = self.state;
        state.write().paused = true;
    }

    pub fn on_ended(&self) {
        let mut state = self.state;
        let next = state.write().on_ended();
        if let Some(next) = next {
            info!(next = %next, "autoplay advancing");
            self.load_video(next);
        }
    }

    pub fn toggle_playback(&self) {
        media::toggle_playback();
    }

    pub fn set_volume(&self, volume: f64) {
        let mut state = self.state;
        state.write().set_volume(volume, &self.prefs);
        media::apply_volume(state.peek().volume);
    }

    pub fn toggle_volume_menu(&self) {
        let mut state = self.state;
        state.write().toggle_volume_menu();
    }

    pub fn toggle_subtitle_menu(&self) {
        let mut state = self.state;
        state.write().subtitles.toggle_open();
    }

    pub fn toggle_autoplay(&self) {
        let mut state = self.state;
        state.write().toggle_autoplay(&self.prefs);
    }

    pub fn toggle_theme(&self) {
        let mut state = self.state;
        state.write().toggle_theme(&self.prefs);
    }

    pub fn toggle_nav(&self) {
        let mut state = self.state;
        state.write().nav.toggle();
    }

    pub fn close_nav(&self) {
        let mut state = self.state;
        state.write().nav.close();
    }

    pub fn dismiss_popovers(&self, inside_volume: bool, inside_subtitles: bool) {
        let mut state = self.state;
        let (volume_open, subtitles_open) = {
            let current = state.peek();
            (current.volume_open, current.subtitles.open)
        };
        if (volume_open && !inside_volume) || (subtitles_open && !inside_subtitles) {
            state.write().dismiss_popovers(inside_volume, inside_subtitles);
        }
    }
}
