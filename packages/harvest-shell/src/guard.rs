//! Navigation guards.
//!
//! A guard is a pure function of the session [`Phase`]:
//!
//! | phase          | `RequireAuthenticated` | `RequireAnonymous`   |
//! |----------------|------------------------|----------------------|
//! | Resolving      | Loading                | Loading              |
//! | Authenticated  | Allow                  | Redirect (entry)     |
//! | Anonymous      | Redirect (auth)        | Allow                |
//!
//! Guards hold no state, so evaluating twice with the same phase always
//! yields the same decision. A redirect is never issued while resolving.

use crate::config::ShellConfig;
use crate::session::Phase;

/// Guard attached to a route node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Guard {
    #[default]
    None,
    RequireAuthenticated,
    RequireAnonymous,
}

impl Guard {
    pub fn is_guarded(&self) -> bool {
        !matches!(self, Guard::None)
    }

    /// The guard that may not appear below this one.
    pub fn opposite(&self) -> Option<Guard> {
        match self {
            Guard::None => None,
            Guard::RequireAuthenticated => Some(Guard::RequireAnonymous),
            Guard::RequireAnonymous => Some(Guard::RequireAuthenticated),
        }
    }

    pub fn evaluate(&self, phase: Phase, targets: &RedirectTargets) -> GuardDecision {
        match (self, phase) {
            (Guard::None, _) => GuardDecision::Allow,
            (_, Phase::Resolving) => GuardDecision::Loading,
            (Guard::RequireAuthenticated, Phase::Authenticated) => GuardDecision::Allow,
            (Guard::RequireAuthenticated, Phase::Anonymous) => GuardDecision::Redirect {
                to: targets.anonymous.clone(),
            },
            (Guard::RequireAnonymous, Phase::Anonymous) => GuardDecision::Allow,
            (Guard::RequireAnonymous, Phase::Authenticated) => GuardDecision::Redirect {
                to: targets.authenticated.clone(),
            },
        }
    }
}

/// What a guard decided for the wrapped content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the loading placeholder; nothing else.
    Loading,
    /// Suppress the content and navigate to `to`.
    Redirect { to: String },
    /// Render the wrapped content.
    Allow,
}

/// Fixed redirect destinations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectTargets {
    /// Where anonymous users are sent (the public entry).
    pub anonymous: String,
    /// Where authenticated users are sent (the protected entry).
    pub authenticated: String,
}

impl RedirectTargets {
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            anonymous: config.auth_path.clone(),
            authenticated: config.protected_entry_path.clone(),
        }
    }
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self::from_config(&ShellConfig::default())
    }
}
