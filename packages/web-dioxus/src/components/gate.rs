//! Mount-point gate

use dioxus::prelude::*;

use super::{LoadingScreen, Redirect};
use crate::auth::use_auth;
use crate::providers::{GateView, ShellRoot};
use crate::routes::Route;

/// Renders `children` only when the navigator lets the current route
/// through.
///
/// Re-evaluates whenever the session snapshot changes.
#[component]
pub fn ShellGate(children: Element) -> Element {
    let root = use_context::<ShellRoot>();
    let auth = use_auth();
    let route = use_route::<Route>();

    // Subscribe to session transitions; the navigator reads the cell itself
    let _phase = auth.snapshot.read().phase();

    match root.gate(&route.to_string()) {
        GateView::Loading => rsx! { LoadingScreen {} },
        GateView::Redirect(to) => rsx! { Redirect { to } },
        GateView::Render => children,
        GateView::Failed(message) => rsx! {
            div {
                class: "min-h-screen flex items-center justify-center",
                p { class: "text-sm text-red-700", "{message}" }
            }
        },
    }
}
