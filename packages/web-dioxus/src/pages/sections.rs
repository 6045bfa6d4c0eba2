//! Screens inside the layout frame

use dioxus::prelude::*;
use harvest_shell::Screen;

use crate::auth::use_auth;
use crate::routes::Route;
use crate::state::{AnalyticsState, InventoryState, LocationState, MatchingState, ThemeState};

/// Heading and body shared by every screen; counts one view per mount.
#[component]
pub fn Section(screen: Screen, children: Element) -> Element {
    let mut analytics = use_context::<AnalyticsState>();
    use_effect(move || {
        tracing::debug!(?screen, "screen viewed");
        analytics.record_view();
    });
    let title = screen.title();

    rsx! {
        div {
            h1 { class: "text-2xl font-bold mb-6", "{title}" }
            {children}
        }
    }
}

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let name = auth
        .current_user()
        .map(|user| user.display_name)
        .unwrap_or_default();

    rsx! {
        Section {
            screen: Screen::Home,
            p { class: "mb-4", "Welcome back, {name}." }
            div {
                class: "flex flex-wrap gap-3",
                QuickActionLink { to: Route::Donate {} }
                QuickActionLink { to: Route::AvailableDonations {} }
                QuickActionLink { to: Route::Dashboard {} }
            }
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    let inventory = use_context::<InventoryState>();
    let matching = use_context::<MatchingState>();
    let analytics = use_context::<AnalyticsState>();

    rsx! {
        Section {
            screen: Screen::Dashboard,
            div {
                class: "grid grid-cols-1 md:grid-cols-3 gap-6",
                StatCard { title: "Items in inventory", value: inventory.items.read().len() as u64 }
                StatCard { title: "Awaiting a match", value: matching.pending.read().len() as u64 }
                StatCard { title: "Screens viewed", value: *analytics.page_views.read() }
            }
        }
    }
}

#[component]
pub fn Donate() -> Element {
    let mut inventory = use_context::<InventoryState>();
    let mut matching = use_context::<MatchingState>();
    let mut item = use_signal(String::new);

    let handle_donate = move |_| {
        let offered = item().trim().to_string();
        if offered.is_empty() {
            return;
        }
        inventory.items.write().push(offered.clone());
        matching.pending.write().push(offered);
        item.set(String::new());
    };

    rsx! {
        Section {
            screen: Screen::Donate,
            form {
                class: "flex gap-3",
                onsubmit: handle_donate,
                input {
                    r#type: "text",
                    value: "{item}",
                    oninput: move |e| item.set(e.value()),
                    placeholder: "e.g. 12 loaves of bread",
                    class: "flex-1 px-3 py-2 border border-gray-300 rounded-md"
                }
                button {
                    r#type: "submit",
                    class: "bg-emerald-700 text-white py-2 px-4 rounded-md hover:bg-emerald-800",
                    "Offer"
                }
            }
        }
    }
}

#[component]
pub fn AvailableDonations() -> Element {
    let matching = use_context::<MatchingState>();

    rsx! {
        Section {
            screen: Screen::AvailableDonations,
            ItemList { items: matching.pending.read().clone(), empty: "No donations are waiting." }
        }
    }
}

#[component]
pub fn Inventory() -> Element {
    let inventory = use_context::<InventoryState>();

    rsx! {
        Section {
            screen: Screen::Inventory,
            ItemList { items: inventory.items.read().clone(), empty: "Inventory is empty." }
        }
    }
}

#[component]
pub fn Logistics() -> Element {
    let location = use_context::<LocationState>();
    let region = location
        .region
        .read()
        .clone()
        .unwrap_or_else(|| "no region set".to_string());

    rsx! {
        Section {
            screen: Screen::Logistics,
            p { class: "text-gray-600", "Pickups are planned for {region}." }
        }
    }
}

#[component]
pub fn Analytics() -> Element {
    let analytics = use_context::<AnalyticsState>();

    rsx! {
        Section {
            screen: Screen::Analytics,
            StatCard { title: "Screens viewed this session", value: *analytics.page_views.read() }
        }
    }
}

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let mut location = use_context::<LocationState>();
    let region = location.region.read().clone().unwrap_or_default();

    rsx! {
        Section {
            screen: Screen::Profile,
            if let Some(user) = auth.current_user() {
                dl {
                    class: "mb-6 space-y-1",
                    dt { class: "text-sm text-gray-500", "Name" }
                    dd { "{user.display_name}" }
                    dt { class: "text-sm text-gray-500", "Email" }
                    dd { "{user.email}" }
                }
            }
            label { class: "block text-sm font-medium mb-2", "Region" }
            input {
                r#type: "text",
                value: "{region}",
                oninput: move |e| {
                    let value = e.value();
                    location.region.set((!value.trim().is_empty()).then_some(value));
                },
                class: "px-3 py-2 border border-gray-300 rounded-md"
            }
        }
    }
}

#[component]
pub fn Settings() -> Element {
    let mut theme = use_context::<ThemeState>();
    let current = *theme.theme.read();
    let label = current.label();
    let other = current.toggled().label();

    rsx! {
        Section {
            screen: Screen::Settings,
            div {
                class: "flex items-center gap-4",
                span { "Theme: {label}" }
                button {
                    class: "px-3 py-1.5 rounded border border-gray-300",
                    onclick: move |_| theme.toggle(),
                    "Switch to {other}"
                }
            }
        }
    }
}

#[component]
fn StatCard(title: &'static str, value: u64) -> Element {
    rsx! {
        div {
            class: "rounded-lg border border-gray-200 p-6",
            p { class: "text-sm text-gray-500", "{title}" }
            p { class: "text-3xl font-bold", "{value}" }
        }
    }
}

#[component]
fn ItemList(items: Vec<String>, empty: &'static str) -> Element {
    if items.is_empty() {
        return rsx! {
            p { class: "text-gray-500", "{empty}" }
        };
    }

    rsx! {
        ul {
            class: "divide-y divide-gray-200",
            for item in items {
                li { class: "py-2", "{item}" }
            }
        }
    }
}

#[component]
fn QuickActionLink(to: Route) -> Element {
    let label = to.screen().title();

    rsx! {
        Link {
            to: to.clone(),
            class: "px-4 py-2 rounded-md border border-emerald-200 text-emerald-800 hover:bg-emerald-50",
            "{label}"
        }
    }
}
