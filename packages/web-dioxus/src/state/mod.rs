//! Global state scopes
//!
//! Each scope owns a handful of signals. The shell only fixes the order they
//! are provided in; screens read them through `use_context`.

use dioxus::prelude::*;

/// Color theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Clone, Copy)]
pub struct ThemeState {
    pub theme: Signal<Theme>,
}

impl ThemeState {
    pub fn new() -> Self {
        Self {
            theme: Signal::new(Theme::default()),
        }
    }

    pub fn class(&self) -> &'static str {
        match *self.theme.read() {
            Theme::Light => "min-h-screen bg-stone-50 text-stone-900",
            Theme::Dark => "min-h-screen bg-stone-900 text-stone-100",
        }
    }

    pub fn toggle(&mut self) {
        let next = self.theme.peek().toggled();
        self.theme.set(next);
    }
}

/// Data-fetching cache shared by screens.
///
/// Screens key their fetches on `generation`; bumping it refetches.
#[derive(Clone, Copy)]
pub struct QueryCache {
    pub generation: Signal<u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            generation: Signal::new(0),
        }
    }

    pub fn invalidate(&mut self) {
        let next = *self.generation.peek() + 1;
        self.generation.set(next);
    }
}

/// Region the volunteer works in
#[derive(Clone, Copy)]
pub struct LocationState {
    pub region: Signal<Option<String>>,
}

impl LocationState {
    pub fn new() -> Self {
        Self {
            region: Signal::new(None),
        }
    }
}

#[derive(Clone, Copy)]
pub struct InventoryState {
    pub items: Signal<Vec<String>>,
}

impl InventoryState {
    pub fn new() -> Self {
        Self {
            items: Signal::new(Vec::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct AnalyticsState {
    pub page_views: Signal<u64>,
}

impl AnalyticsState {
    pub fn new() -> Self {
        Self {
            page_views: Signal::new(0),
        }
    }

    pub fn record_view(&mut self) {
        let next = *self.page_views.peek() + 1;
        self.page_views.set(next);
    }
}

/// Donation offers waiting to be matched with a recipient
#[derive(Clone, Copy)]
pub struct MatchingState {
    pub pending: Signal<Vec<String>>,
}

impl MatchingState {
    pub fn new() -> Self {
        Self {
            pending: Signal::new(Vec::new()),
        }
    }
}
