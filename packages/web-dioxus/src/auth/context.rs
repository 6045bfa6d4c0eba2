//! Session context provider

use dioxus::prelude::*;
use harvest_shell::{SessionError, SessionSnapshot, SessionSource, User};

use crate::providers::ShellRoot;

/// Session state shared with the entire app.
///
/// `snapshot` mirrors the core session cell; writes go through the
/// [`SessionSource`] so the cell stays the single source of truth.
///
/// The signal holds the latest value, not every step. A transition that
/// passes through resolving without yielding, such as a synchronous
/// logout, shows up as a single change to anonymous. Nothing guarded
/// renders in between because the gate redirects anonymous sessions.
#[derive(Clone)]
pub struct AuthContext {
    /// Latest session snapshot
    pub snapshot: Signal<SessionSnapshot>,
    source: SessionSource,
}

impl AuthContext {
    pub fn is_resolving(&self) -> bool {
        self.snapshot.read().is_resolving
    }

    pub fn current_user(&self) -> Option<User> {
        self.snapshot.read().current_user.clone()
    }

    /// Sign in; the snapshot follows once the cell settles
    pub async fn login(&self, user: User) -> Result<(), SessionError> {
        self.source.login(user).await
    }

    /// Sign out (authenticated → resolving → anonymous)
    ///
    /// The resolving step is coalesced unless the store yields.
    pub async fn logout(&self) {
        self.source.logout().await;
    }
}

/// Session scope component: bridges the core cell into a signal and
/// resolves the persisted credential once mounted.
#[component]
pub fn SessionScope(children: Element) -> Element {
    let root = use_context::<ShellRoot>();
    let source = root.session().clone();

    let mut snapshot = use_signal(|| source.cell().snapshot());
    let auth = use_context_provider(|| AuthContext {
        snapshot,
        source: source.clone(),
    });

    // Both tasks belong to this scope and stop when it unmounts, which
    // drops the subscription.
    use_hook(move || {
        let follow = auth.source.clone();
        spawn(async move {
            let mut subscription = follow.cell().subscribe();
            snapshot.set(subscription.current());
            while let Some(next) = subscription.changed().await {
                snapshot.set(next);
            }
        });

        let resolve = auth.source.clone();
        spawn(async move {
            resolve.resolve().await;
        });
    });

    children
}

/// Hook to access the session context
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}
