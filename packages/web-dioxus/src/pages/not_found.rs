//! Catch-all screen inside the layout frame

use dioxus::prelude::*;
use harvest_shell::Screen;

use super::Section;
use crate::routes::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        Section {
            screen: Screen::NotFound,
            p { class: "text-gray-600 mb-4", "Nothing lives at {path}." }
            Link {
                to: Route::Dashboard {},
                class: "text-emerald-700 hover:underline",
                "Back to the dashboard"
            }
        }
    }
}
