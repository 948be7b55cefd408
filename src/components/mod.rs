//! Dioxus components for the player page.

mod app;
mod controller;
mod icons;
pub mod media;
mod player;
mod sidebar;

pub use app::*;
pub use controller::*;
pub use icons::*;
pub use player::*;
pub use sidebar::*;
