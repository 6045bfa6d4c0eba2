//! Longest-match resolution over the route tree.
//!
//! Branches are ranked the way nested routers rank them: each literal segment
//! scores 10, an index route 2, a bare layout root 1 and a catch-all -2. The
//! highest total wins; ties go to the route declared first. Literal segments
//! compare case-insensitively.

use super::path::{segments_eq, starts_with, Location, RoutePath};
use super::{NodeKind, RouteNode, Screen};
use crate::guard::Guard;

const STATIC_SEGMENT_SCORE: i32 = 10;
const INDEX_SCORE: i32 = 2;
const ROOT_SCORE: i32 = 1;
const CATCH_ALL_SCORE: i32 = -2;

/// A matched branch, root first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    branch: Vec<&'a RouteNode>,
    score: i32,
}

impl<'a> RouteMatch<'a> {
    pub fn branch(&self) -> &[&'a RouteNode] {
        &self.branch
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// The deepest matched node.
    pub fn leaf(&self) -> &'a RouteNode {
        self.branch[self.branch.len() - 1]
    }

    /// Position of the outermost guarded node on the branch.
    pub fn guard_depth(&self) -> Option<usize> {
        self.branch.iter().position(|node| node.guard().is_guarded())
    }

    /// The guard gating this branch.
    pub fn guard(&self) -> Guard {
        self.guard_depth()
            .map(|depth| self.branch[depth].guard())
            .unwrap_or(Guard::None)
    }

    /// Declared path of the guarded subtree root, e.g. `/` or `/auth`.
    ///
    /// Two matches share a guard scope exactly when they share this anchor.
    pub fn guard_anchor(&self) -> Option<String> {
        let depth = self.guard_depth()?;
        let segments: Vec<&str> = self.branch[..=depth]
            .iter()
            .filter_map(|node| match node.path() {
                RoutePath::Static(segments) => Some(segments),
                _ => None,
            })
            .flatten()
            .map(|segment| segment.as_str())
            .collect();
        Some(format!("/{}", segments.join("/").to_ascii_lowercase()))
    }

    /// Screens from the outermost layout to the matched screen.
    pub fn frames(&self) -> Vec<Screen> {
        self.branch.iter().map(|node| node.screen()).collect()
    }
}

pub(super) fn resolve<'a>(roots: &'a [RouteNode], location: &Location) -> Option<RouteMatch<'a>> {
    let (branch, score) = match_nodes(roots, location.segments())?;
    Some(RouteMatch { branch, score })
}

fn match_nodes<'a>(
    nodes: &'a [RouteNode],
    segments: &[String],
) -> Option<(Vec<&'a RouteNode>, i32)> {
    let mut best: Option<(Vec<&'a RouteNode>, i32)> = None;
    for node in nodes {
        if let Some((branch, score)) = match_node(node, segments) {
            let better = match &best {
                Some((_, best_score)) => score > *best_score,
                None => true,
            };
            if better {
                best = Some((branch, score));
            }
        }
    }
    best
}

fn match_node<'a>(node: &'a RouteNode, segments: &[String]) -> Option<(Vec<&'a RouteNode>, i32)> {
    match (node.path(), node.kind()) {
        (RoutePath::Index, _) => segments.is_empty().then(|| (vec![node], INDEX_SCORE)),
        (RoutePath::CatchAll, _) => Some((vec![node], CATCH_ALL_SCORE)),
        (RoutePath::Static(prefix), NodeKind::Leaf { .. }) => {
            segments_eq(segments, prefix).then(|| (vec![node], static_score(prefix)))
        }
        (RoutePath::Static(prefix), NodeKind::Layout { children, .. }) => {
            if !starts_with(segments, prefix) {
                return None;
            }
            let rest = &segments[prefix.len()..];
            let own = static_score(prefix);

            match match_nodes(children, rest) {
                Some((mut branch, score)) => {
                    branch.insert(0, node);
                    Some((branch, own + score))
                }
                // A layout alone answers its own path
                None if rest.is_empty() => Some((vec![node], own)),
                None => None,
            }
        }
    }
}

fn static_score(prefix: &[String]) -> i32 {
    if prefix.is_empty() {
        ROOT_SCORE
    } else {
        STATIC_SEGMENT_SCORE * prefix.len() as i32
    }
}
