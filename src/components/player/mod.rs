use crate::components::media::TrackListeners;
use crate::components::PlayerController;
use crate::config::VIDEO_ELEMENT_ID;
use crate::player::VideoSession;
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

mod controls;

use controls::{AutoplayButton, PlayPauseButton, SubtitleControl, VolumeControl};
pub use controls::ThemeButton;

#[component]
pub fn Player() -> Element {
    let controller = use_context::<PlayerController>();
    let state = controller.state();
    let session = state.read().session().cloned();
    let has_session = session.is_some();

    rsx! {
        section { class: "player-area",
            div { id: "player", class: "player",
                // Keyed by generation: every load mounts a brand new <video>.
                for session in session {
                    VideoSurface { key: "{session.generation}", session }
                }
                if !has_session {
                    div { class: "player-placeholder",
                        p { "Select a video to start" }
                    }
                }
            }
            div { class: "controls",
                PlayPauseButton {}
                VolumeControl {}
                SubtitleControl {}
                AutoplayButton {}
            }
        }
    }
}

#[component]
fn VideoSurface(session: VideoSession) -> Element {
    let controller = use_context::<PlayerController>();
    let generation = session.generation;
    // Track listeners live exactly as long as this element.
    let listeners = use_hook(|| Rc::new(RefCell::new(None::<TrackListeners>)));
    use_drop({
        let listeners = listeners.clone();
        move || {
            listeners.borrow_mut().take();
        }
    });

    rsx! {
        video {
            id: VIDEO_ELEMENT_ID,
            controls: true,
            autoplay: true,
            onmounted: {
                let controller = controller.clone();
                move |_| {
                    *listeners.borrow_mut() = controller.on_video_mounted(generation);
                }
            },
            onplay: {
                let controller = controller.clone();
                move |_| controller.on_play()
            },
            onpause: {
                let controller = controller.clone();
                move |_| controller.on_pause()
            },
            onended: {
                let controller = controller.clone();
                move |_| controller.on_ended()
            },
            onloadedmetadata: move |_| controller.on_metadata_loaded(generation),
            source { src: "{session.stream_url}", r#type: "video/mp4" }
            for track in session.subtitles.iter() {
                track {
                    key: "{track.language}",
                    kind: "subtitles",
                    label: "{track.language}",
                    srclang: "{track.language}",
                    src: "{track.src}",
                }
            }
        }
    }
}
