//! Path declarations and normalized locations.

use std::fmt;

/// Path of a route node, relative to its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoutePath {
    /// Matches when the parent matched the whole location.
    Index,
    /// Literal segments; empty for a root layout (`"/"`).
    Static(Vec<String>),
    /// `*`: matches any remainder.
    CatchAll,
}

impl RoutePath {
    /// Parse a declaration such as `"/auth"`, `"dashboard"`, `"/"` or `"*"`.
    pub fn parse(declaration: &str) -> Self {
        let trimmed = declaration.trim();
        if trimmed == "*" {
            return RoutePath::CatchAll;
        }
        RoutePath::Static(split_segments(trimmed))
    }

    /// Whether two sibling declarations would claim the same locations.
    pub fn collides_with(&self, other: &RoutePath) -> bool {
        match (self, other) {
            (RoutePath::Index, RoutePath::Index) => true,
            (RoutePath::CatchAll, RoutePath::CatchAll) => true,
            (RoutePath::Static(a), RoutePath::Static(b)) => segments_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePath::Index => write!(f, "(index)"),
            RoutePath::CatchAll => write!(f, "*"),
            RoutePath::Static(segments) => write!(f, "/{}", segments.join("/")),
        }
    }
}

/// A normalized URL path.
///
/// Query string and fragment are dropped, repeated or trailing slashes are
/// collapsed, and a missing leading slash is tolerated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    segments: Vec<String>,
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        let path = raw.split(['?', '#']).next().unwrap_or_default();
        Self {
            segments: split_segments(path),
        }
    }

    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Location::parse(raw)
    }
}

fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive segment comparison.
pub(crate) fn segments_eq(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_ignore_ascii_case(y))
}

pub(crate) fn starts_with(segments: &[String], prefix: &[String]) -> bool {
    segments.len() >= prefix.len() && segments_eq(&segments[..prefix.len()], prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        assert_eq!(RoutePath::parse("*"), RoutePath::CatchAll);
        assert_eq!(RoutePath::parse("/"), RoutePath::Static(vec![]));
        assert_eq!(
            RoutePath::parse("/auth"),
            RoutePath::Static(vec!["auth".to_string()])
        );
        assert_eq!(
            RoutePath::parse("available-donations"),
            RoutePath::Static(vec!["available-donations".to_string()])
        );
    }

    #[test]
    fn test_location_normalization() {
        assert_eq!(Location::parse("/inventory/").path(), "/inventory");
        assert_eq!(Location::parse("//inventory//").path(), "/inventory");
        assert_eq!(Location::parse("inventory").path(), "/inventory");
        assert_eq!(Location::parse("/inventory?page=2#top").path(), "/inventory");
        assert_eq!(Location::parse("").path(), "/");
        assert!(Location::parse("/?tab=1").is_root());
    }

    #[test]
    fn test_collisions_ignore_case() {
        assert!(RoutePath::parse("Dashboard").collides_with(&RoutePath::parse("/dashboard")));
        assert!(!RoutePath::parse("dashboard").collides_with(&RoutePath::parse("donate")));
        assert!(RoutePath::Index.collides_with(&RoutePath::Index));
        assert!(!RoutePath::Index.collides_with(&RoutePath::CatchAll));
    }
}
