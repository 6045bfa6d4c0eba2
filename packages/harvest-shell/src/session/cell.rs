//! Observable cell holding the latest session snapshot.
//!
//! # Guarantees
//!
//! - **Latest value**: subscribers always read the most recent snapshot
//! - **No duplicate notifications**: publishing an unchanged value is a no-op
//! - **Teardown by drop**: dropping a [`SessionSubscription`] unsubscribes it
//!
//! The cell is owned by the application root (see
//! [`crate::providers::SessionProvider`]) and handed out by clone. It is
//! read-only outside this crate; only [`crate::SessionSource`] publishes.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::{Phase, SessionSnapshot, User};

/// Broadcast cell for the current [`SessionSnapshot`].
#[derive(Clone)]
pub struct SessionCell {
    sender: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionCell {
    /// Create a cell in the `Resolving` phase.
    pub fn new() -> Self {
        Self::with_snapshot(SessionSnapshot::resolving())
    }

    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        let (sender, _) = watch::channel(snapshot);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.sender.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        self.sender.borrow().phase()
    }

    /// Subscribe to future transitions.
    ///
    /// The current value counts as already seen.
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub(crate) fn begin_resolving(&self) -> bool {
        let current_user = self.sender.borrow().current_user.clone();
        self.publish(SessionSnapshot {
            current_user,
            is_resolving: true,
        })
    }

    pub(crate) fn settle(&self, user: Option<User>) -> bool {
        self.publish(SessionSnapshot {
            current_user: user,
            is_resolving: false,
        })
    }

    /// Returns true when subscribers were notified.
    fn publish(&self, next: SessionSnapshot) -> bool {
        let mut transition = None;
        let modified = self.sender.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            transition = Some((current.phase(), next.phase()));
            *current = next;
            true
        });

        if let Some((from, to)) = transition {
            debug!(?from, ?to, subscribers = self.subscriber_count(), "session transition");
        }
        modified
    }
}

impl Default for SessionCell {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCell")
            .field("phase", &self.phase())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

/// A live subscription to a [`SessionCell`].
///
/// Dropping the subscription unsubscribes; nothing outstanding can touch
/// state owned by whoever held it.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: watch::Receiver<SessionSnapshot>,
}

impl SessionSubscription {
    pub fn current(&self) -> SessionSnapshot {
        self.receiver.borrow().clone()
    }

    /// Whether a transition arrived that has not been observed yet.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next transition and return the new snapshot.
    ///
    /// Returns `None` once every handle to the cell is gone.
    pub async fn changed(&mut self) -> Option<SessionSnapshot> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Mark the latest value as seen and return it.
    pub(crate) fn mark_seen(&mut self) -> SessionSnapshot {
        self.receiver.borrow_and_update().clone()
    }

    /// Flag the latest value as unseen, so the next `changed()` returns it.
    pub(crate) fn mark_changed(&mut self) {
        self.receiver.mark_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_resolving() {
        let cell = SessionCell::new();
        assert_eq!(cell.phase(), Phase::Resolving);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn test_unchanged_publish_does_not_notify() {
        let cell = SessionCell::new();
        let subscription = cell.subscribe();

        assert!(!cell.begin_resolving());
        assert!(!subscription.has_changed());

        assert!(cell.settle(None));
        assert!(subscription.has_changed());
        assert!(!cell.settle(None));
    }

    #[test]
    fn test_begin_resolving_keeps_user() {
        let user = User::new("Ada", "ada@example.com");
        let cell = SessionCell::with_snapshot(SessionSnapshot::authenticated(user.clone()));

        cell.begin_resolving();

        let snapshot = cell.snapshot();
        assert_eq!(snapshot.phase(), Phase::Resolving);
        assert_eq!(snapshot.current_user, Some(user));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let cell = SessionCell::new();
        let first = cell.subscribe();
        let second = cell.subscribe();
        assert_eq!(cell.subscriber_count(), 2);

        drop(first);
        assert_eq!(cell.subscriber_count(), 1);
        drop(second);
        assert_eq!(cell.subscriber_count(), 0);

        // Publishing with nobody listening still updates the value
        cell.settle(None);
        assert_eq!(cell.phase(), Phase::Anonymous);
    }

    #[tokio::test]
    async fn test_changed_yields_latest() {
        let cell = SessionCell::new();
        let mut subscription = cell.subscribe();

        let user = User::new("Ada", "ada@example.com");
        cell.settle(Some(user.clone()));

        let snapshot = subscription.changed().await.unwrap();
        assert_eq!(snapshot, SessionSnapshot::authenticated(user));
        assert!(!subscription.has_changed());
    }

    #[test]
    fn test_mark_seen_and_changed() {
        let cell = SessionCell::new();
        let mut subscription = cell.subscribe();

        cell.settle(None);
        assert!(subscription.has_changed());
        assert_eq!(subscription.mark_seen(), SessionSnapshot::anonymous());
        assert!(!subscription.has_changed());

        subscription.mark_changed();
        assert!(subscription.has_changed());
    }

    #[tokio::test]
    async fn test_changed_returns_none_when_cell_dropped() {
        let cell = SessionCell::new();
        let mut subscription = cell.subscribe();
        drop(cell);

        assert!(subscription.changed().await.is_none());
    }
}
