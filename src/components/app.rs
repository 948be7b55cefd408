use crate::api::{Listing, VideoClient};
use crate::components::{media, NavToggle, Player, PlayerController, Sidebar, ThemeButton};
use crate::config::ApiConfig;
use crate::player::PlayerState;
use crate::prefs::{Preferences, Theme};
use dioxus::prelude::*;

const ROOT_DIR: &str = "/";

#[component]
pub fn AppShell() -> Element {
    let prefs = use_hook(Preferences::open);
    let state = use_signal({
        let prefs = prefs.clone();
        move || PlayerState::from_preferences(&prefs)
    });
    let listing = use_signal(Listing::default);
    let controller = use_hook(|| {
        PlayerController::new(
            state,
            listing,
            prefs.clone(),
            VideoClient::new(ApiConfig::from_environment()),
        )
    });

    // Provide state via context
    use_context_provider(|| controller.clone());

    // Mirror theme and panel flags onto <body>.
    use_effect(move || {
        let current = state.read();
        media::set_body_class("light-theme", current.theme == Theme::Light);
        media::set_body_class("nav-hidden", current.nav.hidden);
        media::set_body_class("nav-expanded", current.nav.expanded);
    });

    // One-time setup: outside-click dismissal and the root listing.
    {
        let controller = controller.clone();
        use_effect(move || {
            media::install_outside_click_handler(controller.clone());
            controller.open_directory(ROOT_DIR.to_string());
        });
    }

    rsx! {
        div { class: "app-shell",
            header { class: "top-bar",
                NavToggle {}
                h1 { class: "app-title", "Wallplayer" }
                ThemeButton {}
            }
            div { class: "app-body",
                Sidebar {}
                main { class: "stage", Player {} }
            }
        }
    }
}
