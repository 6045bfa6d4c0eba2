//! Replace-navigation to a path

use dioxus::prelude::*;

use crate::routes::Route;

/// Replaces the current history entry with `to` once mounted.
///
/// Renders nothing; whatever was guarded never reaches the screen.
#[component]
pub fn Redirect(to: String) -> Element {
    let navigator = use_navigator();

    use_effect(move || match to.parse::<Route>() {
        Ok(route) => {
            tracing::info!(%to, "redirect");
            navigator.replace(route);
        }
        Err(e) => tracing::warn!(%to, error = %e, "Redirect target is not a route"),
    });

    rsx! {}
}
