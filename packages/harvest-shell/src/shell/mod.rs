//! Mount point: one location plus one session snapshot in, exactly one
//! outcome out.
//!
//! [`evaluate`] is the pure function; [`Navigator`] drives it over time,
//! following redirects and re-evaluating on session transitions.

mod navigator;

pub use navigator::Navigator;

use tracing::debug;

use crate::error::{Result, ShellError};
use crate::guard::{GuardDecision, RedirectTargets};
use crate::routes::{Location, RouteTable, Screen};
use crate::session::{Phase, SessionSnapshot};

/// What the shell shows for a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Session still resolving; show the placeholder only.
    Loading,
    /// Navigate elsewhere; nothing from the guarded branch is shown.
    Redirect { to: String },
    /// Render the matched screens.
    Render(RenderTree),
}

impl Outcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, Outcome::Loading)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Outcome::Redirect { to } => Some(to),
            _ => None,
        }
    }

    pub fn render_tree(&self) -> Option<&RenderTree> {
        match self {
            Outcome::Render(tree) => Some(tree),
            _ => None,
        }
    }
}

/// Screens to render, outermost layout first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderTree {
    frames: Vec<Screen>,
}

impl RenderTree {
    pub fn new(frames: Vec<Screen>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[Screen] {
        &self.frames
    }

    /// The matched (innermost) screen.
    pub fn screen(&self) -> Screen {
        self.frames.last().copied().unwrap_or(Screen::NotFound)
    }

    /// The enclosing layout, when the screen is nested in one.
    pub fn layout(&self) -> Option<Screen> {
        if self.frames.len() > 1 {
            self.frames.first().copied()
        } else {
            None
        }
    }
}

/// Decide what to show for `location` given `snapshot`.
///
/// Total: every `(location, snapshot)` pair yields exactly one outcome. A
/// location no route answers renders a bare not-found screen.
pub fn evaluate(
    table: &RouteTable,
    location: &Location,
    snapshot: &SessionSnapshot,
    targets: &RedirectTargets,
) -> Outcome {
    let Some(matched) = table.resolve(location) else {
        debug!(%location, "no route matched");
        return Outcome::Render(RenderTree::new(vec![Screen::NotFound]));
    };

    let guard = matched.guard();
    let decision = guard.evaluate(snapshot.phase(), targets);
    debug!(%location, ?guard, ?decision, "guard evaluated");

    match decision {
        GuardDecision::Loading => Outcome::Loading,
        GuardDecision::Redirect { to } => Outcome::Redirect { to },
        GuardDecision::Allow => Outcome::Render(RenderTree::new(matched.frames())),
    }
}

/// Check that each redirect target lands where its phase is allowed.
///
/// A target inside a branch whose guard rejects that phase would redirect
/// again on arrival.
pub fn check_targets(table: &RouteTable, targets: &RedirectTargets) -> Result<()> {
    let expected = [
        (&targets.anonymous, Phase::Anonymous),
        (&targets.authenticated, Phase::Authenticated),
    ];

    for (path, phase) in expected {
        let allowed = table.resolve(&Location::parse(path)).is_some_and(|matched| {
            matched.guard().evaluate(phase, targets) == GuardDecision::Allow
        });

        if !allowed {
            return Err(ShellError::UnreachableTarget {
                path: path.clone(),
                phase,
            });
        }
    }
    Ok(())
}
