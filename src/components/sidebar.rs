use crate::api::{display_name, format_duration, parent_path, BrowseItem, ItemKind};
use crate::components::{Icon, PlayerController};
use crate::player::NavMode;
use dioxus::prelude::*;

/// Side panel with the file browser. Its width follows the body's
/// `nav-hidden` / `nav-expanded` classes.
#[component]
pub fn Sidebar() -> Element {
    let controller = use_context::<PlayerController>();

    let on_close = {
        let controller = controller.clone();
        move |_| controller.close_nav()
    };

    rsx! {
        aside { class: "nav-panel",
            div { class: "nav-header",
                span { class: "nav-title", "Library" }
                button { id: "closeNav", title: "Hide panel", onclick: on_close,
                    Icon { name: "close" }
                }
            }
            FileBrowser {}
        }
    }
}

/// Button in the top bar cycling the panel through normal and expanded, or
/// bringing it back when hidden.
#[component]
pub fn NavToggle() -> Element {
    let controller = use_context::<PlayerController>();
    let state = controller.state();
    let icon = match state.read().nav.mode() {
        NavMode::Hidden => "menu",
        NavMode::Normal => "open_in_full",
        NavMode::Expanded => "close_fullscreen",
    };

    rsx! {
        button {
            id: "toggleNav",
            title: "Toggle panel",
            onclick: move |_| controller.toggle_nav(),
            Icon { name: icon }
        }
    }
}

#[component]
fn FileBrowser() -> Element {
    let controller = use_context::<PlayerController>();
    let listing = controller.listing();
    let state = controller.state();

    let current = listing.read().path.clone();
    let playing = state.read().playing_path().map(str::to_string);
    let entries: Vec<(bool, BrowseItem)> = listing
        .read()
        .items
        .iter()
        .map(|item| (playing.as_deref() == Some(item.path.as_str()), item.clone()))
        .collect();
    let show_parent = !current.is_empty() && current != "/";

    rsx! {
        ul { class: "file-list",
            if show_parent {
                li {
                    class: "directory",
                    onclick: {
                        let controller = controller.clone();
                        let parent = parent_path(&current);
                        move |_| controller.open_directory(parent.clone())
                    },
                    Icon { name: "folder" }
                    span { ".." }
                }
            }
            for (is_playing, item) in entries {
                FileEntry { key: "{item.path}", playing: is_playing, item }
            }
        }
    }
}

#[component]
fn FileEntry(item: BrowseItem, playing: bool) -> Element {
    let controller = use_context::<PlayerController>();
    let name = display_name(&item.name);

    match item.kind {
        ItemKind::Directory => rsx! {
            li {
                class: "directory",
                onclick: {
                    let path = item.path.clone();
                    move |_| controller.open_directory(path.clone())
                },
                Icon { name: "folder" }
                span { class: "name", "{name}" }
            }
        },
        ItemKind::Video => {
            let thumbnail = controller.client().thumbnail_url(&item.path);
            let duration = format_duration(item.duration);
            rsx! {
                li {
                    class: if playing { "video playing" } else { "video" },
                    onclick: {
                        let path = item.path.clone();
                        move |_| controller.load_video(path.clone())
                    },
                    Icon { name: "movie_info", class: "video-icon" }
                    img {
                        class: "thumbnail",
                        src: "{thumbnail}",
                        loading: "lazy",
                        alt: "",
                    }
                    span { class: "name", "{name}" }
                    span { class: "duration", "{duration}" }
                }
            }
        }
    }
}
