use dioxus::prelude::*;

/// A Material Symbols glyph. `name` is the ligature, e.g. `play_arrow`.
#[component]
pub fn Icon(name: &'static str, #[props(default)] class: &'static str) -> Element {
    rsx! {
        span { class: "material-symbols-outlined {class}", "{name}" }
    }
}
