//! Session state as seen by the shell.
//!
//! The shell never owns authentication. It reads a [`SessionSnapshot`]
//! published by a [`SessionSource`] through a [`SessionCell`] and projects it
//! onto a three-valued [`Phase`]:
//!
//! ```text
//! is_resolving == true                  → Resolving
//! is_resolving == false, user present   → Authenticated
//! is_resolving == false, user absent    → Anonymous
//! ```
//!
//! Absence of a user is the only signal for `Anonymous`. No secondary
//! validation happens here; that is the source's job.

mod cell;
mod source;

pub use cell::{SessionCell, SessionSubscription};
pub use source::{CredentialStore, MemoryCredentials, SessionError, SessionSource};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signed-in user, as persisted by a [`CredentialStore`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
}

impl User {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            email: email.into(),
        }
    }
}

/// Resolution phase derived from a [`SessionSnapshot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Resolving,
    Authenticated,
    Anonymous,
}

impl Phase {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Phase::Resolving)
    }
}

/// Raw session value: current user (if any) plus the resolving flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_user: Option<User>,
    pub is_resolving: bool,
}

impl SessionSnapshot {
    pub fn resolving() -> Self {
        Self {
            current_user: None,
            is_resolving: true,
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            current_user: Some(user),
            is_resolving: false,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            current_user: None,
            is_resolving: false,
        }
    }

    /// Project onto a [`Phase`].
    ///
    /// `is_resolving` wins regardless of `current_user`.
    pub fn phase(&self) -> Phase {
        if self.is_resolving {
            Phase::Resolving
        } else if self.current_user.is_some() {
            Phase::Authenticated
        } else {
            Phase::Anonymous
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::resolving()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolving_flag_wins_over_user() {
        let snapshot = SessionSnapshot {
            current_user: Some(User::new("Ada", "ada@example.com")),
            is_resolving: true,
        };
        assert_eq!(snapshot.phase(), Phase::Resolving);
    }

    #[test]
    fn test_settled_phases() {
        let user = User::new("Ada", "ada@example.com");
        assert_eq!(
            SessionSnapshot::authenticated(user).phase(),
            Phase::Authenticated
        );
        assert_eq!(SessionSnapshot::anonymous().phase(), Phase::Anonymous);
    }

    #[test]
    fn test_default_is_resolving() {
        assert_eq!(SessionSnapshot::default().phase(), Phase::Resolving);
        assert!(!Phase::Resolving.is_settled());
        assert!(Phase::Anonymous.is_settled());
    }
}
