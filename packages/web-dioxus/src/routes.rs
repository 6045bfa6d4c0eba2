//! Route definitions for the application
//!
//! Mirrors `RouteTable::standard()` from the core; the tests below keep the
//! two in step.

use dioxus::prelude::*;
use harvest_shell::Screen;

use crate::components::ProtectedLayout;
use crate::pages::{
    Analytics, Auth, AvailableDonations, Dashboard, Donate, Home, Inventory, Logistics, NotFound,
    Profile, Settings,
};

/// All application routes
#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    // Public entry
    #[route("/auth")]
    Auth {},

    // Protected subtree
    #[layout(ProtectedLayout)]
        #[route("/")]
        Home {},

        #[route("/dashboard")]
        Dashboard {},

        #[route("/donate")]
        Donate {},

        #[route("/available-donations")]
        AvailableDonations {},

        #[route("/inventory")]
        Inventory {},

        #[route("/logistics")]
        Logistics {},

        #[route("/analytics")]
        Analytics {},

        #[route("/profile")]
        Profile {},

        #[route("/settings")]
        Settings {},

        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl Route {
    /// The core screen this route renders.
    pub fn screen(&self) -> Screen {
        match self {
            Route::Auth {} => Screen::Auth,
            Route::Home {} => Screen::Home,
            Route::Dashboard {} => Screen::Dashboard,
            Route::Donate {} => Screen::Donate,
            Route::AvailableDonations {} => Screen::AvailableDonations,
            Route::Inventory {} => Screen::Inventory,
            Route::Logistics {} => Screen::Logistics,
            Route::Analytics {} => Screen::Analytics,
            Route::Profile {} => Screen::Profile,
            Route::Settings {} => Screen::Settings,
            Route::NotFound { .. } => Screen::NotFound,
        }
    }
}
