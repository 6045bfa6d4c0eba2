//! Session source: the only writer of the [`SessionCell`].
//!
//! Every operation passes through `Resolving` before settling, so guards
//! reading the cell show a loading placeholder instead of stale content.
//! Failures always settle to `Anonymous`; the cell never stays stuck in
//! `Resolving`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{SessionCell, User};

/// Session source errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Credential store failed: {0}")]
    Credentials(#[from] anyhow::Error),
}

/// Persisted credential backend.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the persisted user, if any.
    async fn load(&self) -> anyhow::Result<Option<User>>;

    async fn store(&self, user: &User) -> anyhow::Result<()>;

    async fn clear(&self) -> anyhow::Result<()>;
}

/// In-process credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    slot: Mutex<Option<User>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        Self {
            slot: Mutex::new(Some(user)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentials {
    async fn load(&self) -> anyhow::Result<Option<User>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("credential slot poisoned"))?;
        Ok(slot.clone())
    }

    async fn store(&self, user: &User) -> anyhow::Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("credential slot poisoned"))?;
        *slot = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("credential slot poisoned"))?;
        *slot = None;
        Ok(())
    }
}

/// Resolves, establishes and ends sessions against a [`CredentialStore`].
#[derive(Clone)]
pub struct SessionSource {
    cell: SessionCell,
    store: Arc<dyn CredentialStore>,
}

impl SessionSource {
    /// Create a source publishing into a fresh cell.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self::with_cell(SessionCell::new(), store)
    }

    pub fn with_cell(cell: SessionCell, store: Arc<dyn CredentialStore>) -> Self {
        Self { cell, store }
    }

    pub fn cell(&self) -> &SessionCell {
        &self.cell
    }

    /// Resolve the persisted credential.
    ///
    /// A failing load is not surfaced: the session settles to anonymous.
    pub async fn resolve(&self) {
        self.cell.begin_resolving();

        let user = match self.store.load().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Failed to load persisted credential, continuing anonymous");
                None
            }
        };

        debug!(authenticated = user.is_some(), "session resolved");
        self.cell.settle(user);
    }

    /// Persist `user` and settle to authenticated.
    pub async fn login(&self, user: User) -> Result<(), SessionError> {
        self.cell.begin_resolving();

        if let Err(e) = self.store.store(&user).await {
            self.cell.settle(None);
            return Err(e.into());
        }

        info!(user_id = %user.id, "signed in");
        self.cell.settle(Some(user));
        Ok(())
    }

    /// End the session: authenticated → resolving → anonymous.
    pub async fn logout(&self) {
        self.cell.begin_resolving();

        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear persisted credential");
        }

        info!("signed out");
        self.cell.settle(None);
    }
}

impl std::fmt::Debug for SessionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSource")
            .field("cell", &self.cell)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Phase, SessionSnapshot};

    struct FailingStore;

    #[async_trait]
    impl CredentialStore for FailingStore {
        async fn load(&self) -> anyhow::Result<Option<User>> {
            Err(anyhow::anyhow!("storage unavailable"))
        }

        async fn store(&self, _user: &User) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("storage unavailable"))
        }

        async fn clear(&self) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("storage unavailable"))
        }
    }

    #[tokio::test]
    async fn test_resolve_with_persisted_user() {
        let user = User::new("Ada", "ada@example.com");
        let source = SessionSource::new(Arc::new(MemoryCredentials::with_user(user.clone())));

        source.resolve().await;

        assert_eq!(source.cell().snapshot(), SessionSnapshot::authenticated(user));
    }

    #[tokio::test]
    async fn test_resolve_without_credential_is_anonymous() {
        let source = SessionSource::new(Arc::new(MemoryCredentials::new()));

        source.resolve().await;

        assert_eq!(source.cell().phase(), Phase::Anonymous);
    }

    #[tokio::test]
    async fn test_failed_load_settles_anonymous() {
        let source = SessionSource::new(Arc::new(FailingStore));

        source.resolve().await;

        assert_eq!(source.cell().phase(), Phase::Anonymous);
    }

    #[tokio::test]
    async fn test_login_persists_user() {
        let store = Arc::new(MemoryCredentials::new());
        let source = SessionSource::new(store.clone());
        source.resolve().await;

        let user = User::new("Ada", "ada@example.com");
        source.login(user.clone()).await.unwrap();

        assert_eq!(source.cell().phase(), Phase::Authenticated);
        assert_eq!(store.load().await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_failed_login_settles_anonymous() {
        let source = SessionSource::new(Arc::new(FailingStore));

        let result = source.login(User::new("Ada", "ada@example.com")).await;

        assert!(matches!(result, Err(SessionError::Credentials(_))));
        assert_eq!(source.cell().phase(), Phase::Anonymous);
    }

    #[tokio::test]
    async fn test_logout_passes_through_resolving() {
        let user = User::new("Ada", "ada@example.com");
        let source = SessionSource::new(Arc::new(MemoryCredentials::with_user(user)));
        source.resolve().await;

        let mut subscription = source.cell().subscribe();
        let observer = tokio::spawn(async move {
            let mut phases = Vec::new();
            while let Some(snapshot) = subscription.changed().await {
                phases.push(snapshot.phase());
                if snapshot.phase() == Phase::Anonymous {
                    break;
                }
            }
            phases
        });

        source.logout().await;
        let phases = observer.await.unwrap();

        assert_eq!(phases.last(), Some(&Phase::Anonymous));
        assert!(!phases.contains(&Phase::Authenticated));
    }

    #[tokio::test]
    async fn test_logout_settles_even_when_clear_fails() {
        let cell = SessionCell::with_snapshot(SessionSnapshot::authenticated(User::new(
            "Ada",
            "ada@example.com",
        )));
        let source = SessionSource::with_cell(cell, Arc::new(FailingStore));

        source.logout().await;

        assert_eq!(source.cell().phase(), Phase::Anonymous);
    }
}
