//! Navigation bar for the protected subtree

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::routes::Route;
use crate::state::QueryCache;

/// Main navigation bar
#[component]
pub fn ShellNav() -> Element {
    let auth = use_auth();
    let mut cache = use_context::<QueryCache>();

    // The session gate redirects to the sign-in screen once the cell settles
    let handle_logout = {
        let auth = auth.clone();
        move |_| {
            let auth = auth.clone();
            spawn(async move {
                auth.logout().await;
                cache.invalidate();
            });
        }
    };

    rsx! {
        nav {
            class: "border-b border-gray-200 px-6 py-3",
            div {
                class: "flex items-center justify-between",

                // Logo / Brand
                div {
                    class: "flex items-center gap-6",
                    Link {
                        to: Route::Home {},
                        class: "text-xl font-bold text-emerald-700",
                        "Harvest"
                    }

                    // Nav links
                    div {
                        class: "hidden md:flex items-center gap-1",
                        NavLink { to: Route::Dashboard {} }
                        NavLink { to: Route::Donate {} }
                        NavLink { to: Route::AvailableDonations {} }
                        NavLink { to: Route::Inventory {} }
                        NavLink { to: Route::Logistics {} }
                        NavLink { to: Route::Analytics {} }
                    }
                }

                // User menu
                div {
                    class: "flex items-center gap-4",
                    if let Some(user) = auth.current_user() {
                        Link {
                            to: Route::Profile {},
                            class: "text-sm text-gray-600",
                            "{user.display_name}"
                        }
                    }
                    NavLink { to: Route::Settings {} }
                    button {
                        class: "text-sm text-gray-600 hover:text-gray-900 px-3 py-1.5 rounded hover:bg-gray-100",
                        onclick: handle_logout,
                        "Logout"
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct NavLinkProps {
    to: Route,
}

#[component]
fn NavLink(props: NavLinkProps) -> Element {
    let route = use_route::<Route>();
    let is_active = route == props.to;
    let label = props.to.screen().title();

    rsx! {
        Link {
            to: props.to.clone(),
            class: if is_active {
                "px-3 py-2 rounded-md text-sm font-medium bg-emerald-100 text-emerald-800"
            } else {
                "px-3 py-2 rounded-md text-sm font-medium text-gray-600 hover:bg-gray-100 hover:text-gray-900"
            },
            "{label}"
        }
    }
}
