use crate::components::{Icon, PlayerController};
use dioxus::prelude::*;

/// Play/pause button; the icon mirrors the media element's events.
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let controller = use_context::<PlayerController>();
    let state = controller.state();
    let icon = state.read().play_pause_icon();

    rsx! {
        button {
            id: "playPause",
            r#type: "button",
            onclick: move |_| controller.toggle_playback(),
            Icon { name: icon }
        }
    }
}

/// Volume popover: a 0-100 slider that persists and closes on commit.
#[component]
pub(super) fn VolumeControl() -> Element {
    let controller = use_context::<PlayerController>();
    let state = controller.state();
    let (open, volume, label) = {
        let current = state.read();
        (current.volume_open, current.volume, current.volume_label())
    };
    let percent = (volume * 100.0).round() as i32;

    let on_toggle = {
        let controller = controller.clone();
        move |_| controller.toggle_volume_menu()
    };
    let on_change = move |e: Event<FormData>| {
        if let Ok(val) = e.value().parse::<f64>() {
            controller.set_volume(val / 100.0);
        }
    };

    let volume_icon: &'static str = if volume == 0.0 { "volume_off" } else { "volume_up" };

    rsx! {
        div { class: if open { "volume-control open" } else { "volume-control" },
            button { r#type: "button", onclick: on_toggle,
                Icon { name: volume_icon }
                span { class: "value", "{label}" }
            }
            if open {
                div { class: "volume-menu",
                    input {
                        r#type: "range",
                        min: "0",
                        max: "100",
                        step: "5",
                        value: percent,
                        onchange: on_change,
                    }
                }
            }
        }
    }
}

/// Subtitle language picker. Inert with an `NA` label when the loaded video
/// has no subtitle tracks.
#[component]
pub(super) fn SubtitleControl() -> Element {
    let controller = use_context::<PlayerController>();
    let state = controller.state();
    let (enabled, open, label, entries) = {
        let current = state.read();
        let menu = &current.subtitles;
        (
            menu.is_enabled(),
            menu.open,
            menu.label().to_string(),
            menu.entries(),
        )
    };

    let class = match (enabled, open) {
        (false, _) => "subtitle-control disabled",
        (true, true) => "subtitle-control open",
        (true, false) => "subtitle-control",
    };

    rsx! {
        div { class,
            button {
                id: "subtitleButton",
                r#type: "button",
                disabled: !enabled,
                onclick: {
                    let controller = controller.clone();
                    move |_| controller.toggle_subtitle_menu()
                },
                Icon { name: "subtitles" }
                span { class: "value", "{label}" }
            }
            if open {
                div { class: "subtitle-menu",
                    for entry in entries {
                        button {
                            key: "{entry.label}",
                            r#type: "button",
                            onclick: {
                                let controller = controller.clone();
                                let choice = entry.choice.clone();
                                move |_| controller.select_subtitle(choice.clone())
                            },
                            "{entry.label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub(super) fn AutoplayButton() -> Element {
    let controller = use_context::<PlayerController>();
    let state = controller.state();
    let (active, title) = {
        let current = state.read();
        (current.autoplay, current.autoplay_title())
    };

    rsx! {
        button {
            id: "toggleAutoplay",
            r#type: "button",
            class: if active { "active" } else { "" },
            title,
            onclick: move |_| controller.toggle_autoplay(),
            Icon { name: "autoplay" }
        }
    }
}

#[component]
pub fn ThemeButton() -> Element {
    let controller = use_context::<PlayerController>();
    let state = controller.state();
    let icon = state.read().theme.icon();

    rsx! {
        button {
            id: "toggleTheme",
            r#type: "button",
            title: "Toggle theme",
            onclick: move |_| controller.toggle_theme(),
            Icon { name: icon }
        }
    }
}
