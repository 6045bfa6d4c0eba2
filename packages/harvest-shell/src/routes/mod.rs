//! Route table: a static tree from URL paths to guarded screens.
//!
//! ```text
//! /auth                 RequireAnonymous      Auth
//! /                     RequireAuthenticated  Layout
//!   (index)                                     Home
//!   dashboard                                   Dashboard
//!   donate                                      Donate
//!   available-donations                         AvailableDonations
//!   inventory                                   Inventory
//!   logistics                                   Logistics
//!   analytics                                   Analytics
//!   profile                                     Profile
//!   settings                                    Settings
//!   *                                           NotFound
//! ```
//!
//! The two guarded subtrees are disjoint, so a matched branch is gated by at
//! most one guard: the outermost guarded node on it.

mod matcher;
mod path;
mod table;

pub use matcher::RouteMatch;
pub use path::{Location, RoutePath};
pub use table::{RouteTable, RouteTableBuilder, RouteTableError};

use crate::guard::Guard;

/// Opaque renderable units known to the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Auth,
    /// The layout frame hosting protected screens.
    Layout,
    Home,
    Dashboard,
    Donate,
    AvailableDonations,
    Inventory,
    Logistics,
    Analytics,
    Profile,
    Settings,
    NotFound,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Auth => "Sign in",
            Screen::Layout => "Harvest",
            Screen::Home => "Home",
            Screen::Dashboard => "Dashboard",
            Screen::Donate => "Donate",
            Screen::AvailableDonations => "Available Donations",
            Screen::Inventory => "Inventory",
            Screen::Logistics => "Logistics",
            Screen::Analytics => "Analytics",
            Screen::Profile => "Profile",
            Screen::Settings => "Settings",
            Screen::NotFound => "Not Found",
        }
    }
}

/// Layout or leaf, tagged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Layout {
        frame: Screen,
        children: Vec<RouteNode>,
    },
    Leaf {
        screen: Screen,
    },
}

/// One node of the route tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteNode {
    path: RoutePath,
    guard: Guard,
    kind: NodeKind,
}

impl RouteNode {
    pub fn leaf(path: &str, screen: Screen) -> Self {
        Self {
            path: RoutePath::parse(path),
            guard: Guard::None,
            kind: NodeKind::Leaf { screen },
        }
    }

    pub fn index(screen: Screen) -> Self {
        Self {
            path: RoutePath::Index,
            guard: Guard::None,
            kind: NodeKind::Leaf { screen },
        }
    }

    pub fn catch_all(screen: Screen) -> Self {
        Self {
            path: RoutePath::CatchAll,
            guard: Guard::None,
            kind: NodeKind::Leaf { screen },
        }
    }

    pub fn layout(path: &str, frame: Screen, children: Vec<RouteNode>) -> Self {
        Self {
            path: RoutePath::parse(path),
            guard: Guard::None,
            kind: NodeKind::Layout { frame, children },
        }
    }

    pub fn guarded(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    pub fn guard(&self) -> Guard {
        self.guard
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The screen this node renders (its frame, for layouts).
    pub fn screen(&self) -> Screen {
        match &self.kind {
            NodeKind::Layout { frame, .. } => *frame,
            NodeKind::Leaf { screen } => *screen,
        }
    }

    pub fn children(&self) -> &[RouteNode] {
        match &self.kind {
            NodeKind::Layout { children, .. } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }
}
