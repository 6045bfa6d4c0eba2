//! Root application component

use dioxus::prelude::*;
use harvest_shell::ShellConfig;

use crate::providers::{ShellRoot, ShellScopes};
use crate::routes::Route;

/// Root application component
#[component]
pub fn App() -> Element {
    let config = use_context::<ShellConfig>();
    let root = use_hook(move || ShellRoot::mount(&config).map_err(|e| e.to_string()));

    match root {
        // Provider scopes wrap the router; the session scope is innermost
        Ok(root) => rsx! {
            ShellScopes { root,
                Router::<Route> {}
            }
        },
        Err(message) => {
            tracing::error!(error = %message, "Failed to mount provider stack");
            rsx! {
                div {
                    class: "min-h-screen flex items-center justify-center",
                    p { class: "text-sm text-red-700", "Harvest failed to start: {message}" }
                }
            }
        }
    }
}
