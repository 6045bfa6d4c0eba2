//! Layout frame for the protected subtree

use dioxus::prelude::*;

use super::{ShellGate, ShellNav};
use crate::routes::Route;

/// Protected layout: gated by the session, then navigation plus the
/// matched screen.
#[component]
pub fn ProtectedLayout() -> Element {
    rsx! {
        ShellGate {
            LayoutFrame {}
        }
    }
}

#[component]
fn LayoutFrame() -> Element {
    rsx! {
        div {
            class: "min-h-screen",

            // Navigation
            ShellNav {}

            // Main content
            main {
                class: "p-6",
                Outlet::<Route> {}
            }
        }
    }
}
