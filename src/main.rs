use dioxus::prelude::*;

mod api;
mod components;
mod config;
mod player;
mod prefs;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");
const SYMBOLS_FONT: &str =
    "https://fonts.googleapis.com/css2?family=Material+Symbols+Outlined:opsz,wght,FILL,GRAD@24,400,0,0";

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Title { "Wallplayer" }
        document::Stylesheet { href: SYMBOLS_FONT }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
