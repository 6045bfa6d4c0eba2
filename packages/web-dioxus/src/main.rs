//! Harvest - Dioxus Web Application
//!
//! Renders the session-gated shell from `harvest-shell`: provider scopes are
//! nested in the core's order, the session is bridged into a Dioxus context,
//! and every route passes through the core mount-point evaluation.
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! dx serve --features web
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release --features web
//! ```

#![allow(non_snake_case)]

mod app;
mod auth;
mod components;
mod pages;
mod providers;
mod routes;
mod state;

use harvest_shell::ShellConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("harvest_web=info,harvest_shell=info")),
        )
        .init();

    let config = match ShellConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid shell configuration, using defaults");
            ShellConfig::default()
        }
    };

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .launch(app::App);
}
