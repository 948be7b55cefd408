// Browser-side helpers for the `<video>` element and `<body>` marker classes.
// Native builds get inert stand-ins so the rest of the crate stays target
// independent.
use crate::components::PlayerController;
use crate::player::{TextTrackSet, TrackMode};

#[cfg(target_arch = "wasm32")]
use crate::config::{TRACK_POLL_ATTEMPTS, TRACK_POLL_INTERVAL_MS, VIDEO_ELEMENT_ID};
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use dioxus::prelude::spawn;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{
    window, Element, HtmlVideoElement, TextTrack, TextTrackKind, TextTrackList,
    TextTrackMode as DomTrackMode, TrackEvent,
};

/// The active video's text tracks.
#[cfg(target_arch = "wasm32")]
pub struct DomTextTracks(TextTrackList);

#[cfg(not(target_arch = "wasm32"))]
pub struct DomTextTracks;

#[cfg(target_arch = "wasm32")]
impl TextTrackSet for DomTextTracks {
    fn len(&self) -> usize {
        self.0.length() as usize
    }

    fn language(&self, index: usize) -> Option<String> {
        self.0.get(index as u32).map(|track| track.language())
    }

    fn mode(&self, index: usize) -> Option<TrackMode> {
        self.0.get(index as u32).map(|track| match track.mode() {
            DomTrackMode::Showing => TrackMode::Showing,
            DomTrackMode::Hidden => TrackMode::Hidden,
            _ => TrackMode::Disabled,
        })
    }

    fn set_mode(&mut self, index: usize, mode: TrackMode) {
        if let Some(track) = self.0.get(index as u32) {
            track.set_mode(match mode {
                TrackMode::Showing => DomTrackMode::Showing,
                TrackMode::Hidden => DomTrackMode::Hidden,
                TrackMode::Disabled => DomTrackMode::Disabled,
            });
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TextTrackSet for DomTextTracks {
    fn len(&self) -> usize {
        0
    }

    fn language(&self, _index: usize) -> Option<String> {
        None
    }

    fn mode(&self, _index: usize) -> Option<TrackMode> {
        None
    }

    fn set_mode(&mut self, _index: usize, _mode: TrackMode) {}
}

#[cfg(target_arch = "wasm32")]
fn video_element() -> Option<HtmlVideoElement> {
    let document = window()?.document()?;
    document
        .get_element_by_id(VIDEO_ELEMENT_ID)?
        .dyn_into::<HtmlVideoElement>()
        .ok()
}

#[cfg(target_arch = "wasm32")]
pub fn text_tracks() -> Option<DomTextTracks> {
    video_element()?.text_tracks().map(DomTextTracks)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn text_tracks() -> Option<DomTextTracks> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn is_paused() -> Option<bool> {
    video_element().map(|video| video.paused())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn is_paused() -> Option<bool> {
    None
}

/// Play when paused, pause when playing. The button icon follows from the
/// element's own play/pause events.
#[cfg(target_arch = "wasm32")]
pub fn toggle_playback() {
    let Some(video) = video_element() else {
        return;
    };
    if video.paused() {
        if let Ok(promise) = video.play() {
            spawn(async move {
                let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
            });
        }
    } else if let Err(err) = video.pause() {
        tracing::debug!(?err, "pause rejected");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn toggle_playback() {}

#[cfg(target_arch = "wasm32")]
pub fn apply_volume(volume: f64) {
    if let Some(video) = video_element() {
        video.set_volume(volume.clamp(0.0, 1.0));
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn apply_volume(_volume: f64) {}

#[cfg(target_arch = "wasm32")]
pub fn set_body_class(class: &str, enabled: bool) {
    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let _ = body.class_list().toggle_with_force(class, enabled);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_body_class(_class: &str, _enabled: bool) {}

/// Wait until the browser lists at least `expected` text tracks on the
/// active video. Gives up after a bounded number of checks.
#[cfg(target_arch = "wasm32")]
pub async fn wait_for_text_tracks(expected: usize) -> bool {
    for _ in 0..TRACK_POLL_ATTEMPTS {
        if text_tracks().is_some_and(|tracks| tracks.len() >= expected) {
            return true;
        }
        gloo_timers::future::TimeoutFuture::new(TRACK_POLL_INTERVAL_MS).await;
    }
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn wait_for_text_tracks(_expected: usize) -> bool {
    false
}

/// `change` and subtitle `addtrack` listeners on one video's text-track
/// list. Dropping it detaches them.
#[cfg(target_arch = "wasm32")]
pub struct TrackListeners {
    tracks: TextTrackList,
    change: Closure<dyn FnMut(web_sys::Event)>,
    add: Closure<dyn FnMut(TrackEvent)>,
}

#[cfg(not(target_arch = "wasm32"))]
pub struct TrackListeners;

#[cfg(target_arch = "wasm32")]
impl Drop for TrackListeners {
    fn drop(&mut self) {
        let _ = self
            .tracks
            .remove_event_listener_with_callback("change", self.change.as_ref().unchecked_ref());
        let _ = self
            .tracks
            .remove_event_listener_with_callback("addtrack", self.add.as_ref().unchecked_ref());
    }
}

/// Forward the text-track list's `change` and subtitle `addtrack` events of
/// the freshly mounted video to the controller.
#[cfg(target_arch = "wasm32")]
pub fn attach_track_listeners(
    controller: PlayerController,
    generation: u64,
) -> Option<TrackListeners> {
    let tracks = video_element()?.text_tracks()?;

    let runtime = Runtime::current();

    let change = {
        let controller = controller.clone();
        let runtime = runtime.clone();
        Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let _guard = RuntimeGuard::new(runtime.clone());
            controller.reconcile_subtitles(generation);
        }) as Box<dyn FnMut(_)>)
    };
    let add = Closure::wrap(Box::new(move |event: TrackEvent| {
        let is_subtitle = event
            .track()
            .and_then(|track| track.dyn_into::<TextTrack>().ok())
            .is_some_and(|track| track.kind() == TextTrackKind::Subtitles);
        if is_subtitle {
            let _guard = RuntimeGuard::new(runtime.clone());
            controller.reconcile_subtitles(generation);
        }
    }) as Box<dyn FnMut(_)>);

    let _ = tracks.add_event_listener_with_callback("change", change.as_ref().unchecked_ref());
    let _ = tracks.add_event_listener_with_callback("addtrack", add.as_ref().unchecked_ref());
    Some(TrackListeners {
        tracks,
        change,
        add,
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn attach_track_listeners(
    _controller: PlayerController,
    _generation: u64,
) -> Option<TrackListeners> {
    None
}

#[cfg(target_arch = "wasm32")]
fn event_within(event: &web_sys::Event, selector: &str) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(selector).ok().flatten())
        .is_some()
}

/// Close the volume and subtitle popovers on clicks outside of them.
#[cfg(target_arch = "wasm32")]
pub fn install_outside_click_handler(controller: PlayerController) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };

    let runtime = Runtime::current();
    let click_cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let _guard = RuntimeGuard::new(runtime.clone());
        controller.dismiss_popovers(
            event_within(&event, ".volume-control"),
            event_within(&event, ".subtitle-control"),
        );
    }) as Box<dyn FnMut(_)>);

    let _ = doc.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
    click_cb.forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn install_outside_click_handler(_controller: PlayerController) {}
