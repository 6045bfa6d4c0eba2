use thiserror::Error;

use super::matcher::{self, RouteMatch};
use super::path::{Location, RoutePath};
use super::{NodeKind, RouteNode, Screen};
use crate::guard::Guard;

/// Route table validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("Duplicate route path: {path}")]
    DuplicatePath { path: String },

    #[error("Index and catch-all routes must be nested in a layout: {path}")]
    OutsideLayout { path: String },

    #[error("Only leaf routes may use index or catch-all paths: {path}")]
    LayoutPath { path: String },

    #[error("{guard:?} route {path} is nested beneath an opposing guard")]
    ConflictingGuards { path: String, guard: Guard },
}

/// Static route tree, validated on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    roots: Vec<RouteNode>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder { roots: Vec::new() }
    }

    /// The application's table: one public subtree at `/auth`, one protected
    /// subtree under the layout root.
    pub fn standard() -> Self {
        Self {
            roots: vec![
                RouteNode::leaf("/auth", Screen::Auth).guarded(Guard::RequireAnonymous),
                RouteNode::layout(
                    "/",
                    Screen::Layout,
                    vec![
                        RouteNode::index(Screen::Home),
                        RouteNode::leaf("dashboard", Screen::Dashboard),
                        RouteNode::leaf("donate", Screen::Donate),
                        RouteNode::leaf("available-donations", Screen::AvailableDonations),
                        RouteNode::leaf("inventory", Screen::Inventory),
                        RouteNode::leaf("logistics", Screen::Logistics),
                        RouteNode::leaf("analytics", Screen::Analytics),
                        RouteNode::leaf("profile", Screen::Profile),
                        RouteNode::leaf("settings", Screen::Settings),
                        RouteNode::catch_all(Screen::NotFound),
                    ],
                )
                .guarded(Guard::RequireAuthenticated),
            ],
        }
    }

    pub fn roots(&self) -> &[RouteNode] {
        &self.roots
    }

    /// Find the best-ranked branch for `location`.
    pub fn resolve(&self, location: &Location) -> Option<RouteMatch<'_>> {
        matcher::resolve(&self.roots, location)
    }

    /// Every concrete path a static or index route answers, with its screen.
    pub fn concrete_paths(&self) -> Vec<(String, Screen)> {
        let mut paths = Vec::new();
        collect_paths(&self.roots, &[], &mut paths);
        paths
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

pub struct RouteTableBuilder {
    roots: Vec<RouteNode>,
}

impl RouteTableBuilder {
    pub fn route(mut self, node: RouteNode) -> Self {
        self.roots.push(node);
        self
    }

    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        validate_siblings(&self.roots, &[], None, true)?;
        validate_full_paths(&self.roots)?;
        Ok(RouteTable { roots: self.roots })
    }
}

fn validate_siblings(
    nodes: &[RouteNode],
    prefix: &[String],
    inherited: Option<Guard>,
    top_level: bool,
) -> Result<(), RouteTableError> {
    for (i, node) in nodes.iter().enumerate() {
        let path = display_path(prefix, node.path());

        if nodes[..i]
            .iter()
            .any(|earlier| earlier.path().collides_with(node.path()))
        {
            return Err(RouteTableError::DuplicatePath { path });
        }

        let is_special = matches!(node.path(), RoutePath::Index | RoutePath::CatchAll);
        if is_special && top_level {
            return Err(RouteTableError::OutsideLayout { path });
        }

        if let Some(outer) = inherited {
            if outer.opposite() == Some(node.guard()) {
                return Err(RouteTableError::ConflictingGuards {
                    path,
                    guard: node.guard(),
                });
            }
        }

        if let NodeKind::Layout { children, .. } = node.kind() {
            let RoutePath::Static(segments) = node.path() else {
                return Err(RouteTableError::LayoutPath { path });
            };

            let mut nested = prefix.to_vec();
            nested.extend(segments.iter().cloned());
            let guard = inherited.or_else(|| node.guard().is_guarded().then_some(node.guard()));
            validate_siblings(children, &nested, guard, false)?;
        }
    }
    Ok(())
}

/// Every concrete path is answered by exactly one leaf, across nesting levels.
fn validate_full_paths(roots: &[RouteNode]) -> Result<(), RouteTableError> {
    let mut paths = Vec::new();
    collect_paths(roots, &[], &mut paths);

    let mut seen: Vec<String> = Vec::with_capacity(paths.len());
    for (path, _) in paths {
        let key = path.to_lowercase();
        if seen.contains(&key) {
            return Err(RouteTableError::DuplicatePath { path });
        }
        seen.push(key);
    }
    Ok(())
}

fn collect_paths(nodes: &[RouteNode], prefix: &[String], out: &mut Vec<(String, Screen)>) {
    for node in nodes {
        match (node.path(), node.kind()) {
            (RoutePath::Index, NodeKind::Leaf { screen }) => {
                out.push((format!("/{}", prefix.join("/")), *screen));
            }
            (RoutePath::Static(segments), NodeKind::Leaf { screen }) => {
                let full: Vec<String> = prefix.iter().chain(segments).cloned().collect();
                out.push((format!("/{}", full.join("/")), *screen));
            }
            (RoutePath::Static(segments), NodeKind::Layout { children, .. }) => {
                let full: Vec<String> = prefix.iter().chain(segments).cloned().collect();
                collect_paths(children, &full, out);
            }
            _ => {}
        }
    }
}

fn display_path(prefix: &[String], path: &RoutePath) -> String {
    let base = format!("/{}", prefix.join("/"));
    match path {
        RoutePath::Static(segments) if prefix.is_empty() => format!("/{}", segments.join("/")),
        RoutePath::Static(segments) => format!("{}/{}", base, segments.join("/")),
        RoutePath::Index => base,
        RoutePath::CatchAll if prefix.is_empty() => "/*".to_string(),
        RoutePath::CatchAll => format!("{}/*", base),
    }
}
