//! Sign-in screen

use dioxus::prelude::*;
use harvest_shell::User;

use crate::auth::use_auth;
use crate::components::ShellGate;

/// Public entry; signed-in visitors are sent on to the dashboard.
#[component]
pub fn Auth() -> Element {
    rsx! {
        ShellGate {
            SignInForm {}
        }
    }
}

#[component]
fn SignInForm() -> Element {
    let auth = use_auth();

    let mut display_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_pending = use_signal(|| false);

    let handle_sign_in = move |_| {
        let name = display_name().trim().to_string();
        let address = email().trim().to_string();

        if name.is_empty() || address.is_empty() {
            error.set(Some("Please enter your name and email".to_string()));
            return;
        }
        if !address.contains('@') {
            error.set(Some("Please enter a valid email address".to_string()));
            return;
        }

        let auth = auth.clone();
        spawn(async move {
            is_pending.set(true);
            error.set(None);

            // On success the gate above redirects to the dashboard
            if let Err(e) = auth.login(User::new(name, address)).await {
                error.set(Some(e.to_string()));
            }

            is_pending.set(false);
        });
    };

    rsx! {
        div {
            class: "min-h-screen flex items-center justify-center px-4",

            div {
                class: "bg-white rounded-lg shadow-md p-8 max-w-md w-full",

                div {
                    class: "mb-6 text-center",
                    h1 { class: "text-2xl font-bold text-gray-900 mb-2", "Sign in" }
                    p { class: "text-gray-600 text-sm", "Harvest food rescue network" }
                }

                if let Some(err) = error() {
                    div {
                        class: "mb-4 p-3 bg-orange-50 border border-orange-200 text-orange-800 rounded text-sm",
                        "{err}"
                    }
                }

                form {
                    onsubmit: handle_sign_in,
                    div {
                        class: "mb-4",
                        label {
                            class: "block text-sm font-medium text-gray-700 mb-2",
                            "Name"
                        }
                        input {
                            r#type: "text",
                            value: "{display_name}",
                            oninput: move |e| display_name.set(e.value()),
                            class: "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-emerald-500",
                            disabled: is_pending()
                        }
                    }
                    div {
                        class: "mb-4",
                        label {
                            class: "block text-sm font-medium text-gray-700 mb-2",
                            "Email"
                        }
                        input {
                            r#type: "email",
                            value: "{email}",
                            oninput: move |e| email.set(e.value()),
                            placeholder: "volunteer@example.com",
                            class: "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-emerald-500",
                            disabled: is_pending()
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "w-full bg-emerald-700 text-white py-2 px-4 rounded-md hover:bg-emerald-800 disabled:opacity-50 disabled:cursor-not-allowed",
                        disabled: is_pending(),
                        if is_pending() { "Signing in..." } else { "Sign In" }
                    }
                }
            }
        }
    }
}
