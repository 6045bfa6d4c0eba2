//! Provider composition stack.
//!
//! State scopes are initialized in an explicit order, outer to inner, and
//! torn down in reverse. The scopes are independent of each other; the one
//! hard rule is that the session scope is mounted before anything that reads
//! it, which is why the navigator can only be created from a
//! [`MountedStack`].
//!
//! ```text
//! QueryCache → Theme → Location → Inventory → Analytics → Matching
//!   → Session → (router)
//! ```

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ShellConfig;
use crate::error::{Result, ShellError};
use crate::guard::RedirectTargets;
use crate::routes::RouteTable;
use crate::session::SessionSource;
use crate::shell::{check_targets, Navigator};

/// Application state scopes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Data-fetching cache shared by screens
    QueryCache,
    Theme,
    Location,
    Inventory,
    Analytics,
    Matching,
    Session,
}

impl Scope {
    /// The application's order, outer to inner.
    pub const STANDARD_ORDER: [Scope; 7] = [
        Scope::QueryCache,
        Scope::Theme,
        Scope::Location,
        Scope::Inventory,
        Scope::Analytics,
        Scope::Matching,
        Scope::Session,
    ];
}

/// Provider stack errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Scope {0:?} is provided more than once")]
    DuplicateScope(Scope),

    #[error("Scope {scope:?} requires {missing:?} to be initialized before it")]
    MissingDependency { scope: Scope, missing: Scope },

    #[error("No session scope in the provider stack")]
    MissingSession,

    #[error("Failed to initialize {scope:?}: {source}")]
    Initialization {
        scope: Scope,
        #[source]
        source: anyhow::Error,
    },
}

/// One state scope in the stack.
pub trait Provider: Send {
    fn scope(&self) -> Scope;

    /// Scopes that must be initialized before this one.
    fn requires(&self) -> &[Scope] {
        &[]
    }

    fn initialize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn teardown(&mut self) {}

    /// The session source, for the session scope only.
    fn session(&self) -> Option<&SessionSource> {
        None
    }
}

/// A scope whose state lives outside the core.
#[derive(Debug, Clone, Copy)]
pub struct PassiveScope {
    scope: Scope,
}

impl PassiveScope {
    pub fn new(scope: Scope) -> Self {
        Self { scope }
    }
}

impl Provider for PassiveScope {
    fn scope(&self) -> Scope {
        self.scope
    }
}

/// The session scope.
///
/// Initializing it puts the cell back into `Resolving`, so a remount always
/// passes through the loading placeholder before a terminal phase.
#[derive(Debug, Clone)]
pub struct SessionProvider {
    source: SessionSource,
}

impl SessionProvider {
    pub fn new(source: SessionSource) -> Self {
        Self { source }
    }
}

impl Provider for SessionProvider {
    fn scope(&self) -> Scope {
        Scope::Session
    }

    fn initialize(&mut self) -> anyhow::Result<()> {
        self.source.cell().begin_resolving();
        Ok(())
    }

    fn session(&self) -> Option<&SessionSource> {
        Some(&self.source)
    }
}

/// Validated initialization order.
pub struct ProviderStack {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderStack {
    pub fn builder() -> ProviderStackBuilder {
        ProviderStackBuilder {
            providers: Vec::new(),
        }
    }

    /// The application's stack around `source`.
    pub fn standard(source: SessionSource) -> Self {
        let mut providers: Vec<Box<dyn Provider>> = Scope::STANDARD_ORDER
            .iter()
            .filter(|scope| **scope != Scope::Session)
            .map(|scope| Box::new(PassiveScope::new(*scope)) as Box<dyn Provider>)
            .collect();
        providers.push(Box::new(SessionProvider::new(source)));
        Self { providers }
    }

    /// Scopes, outer to inner.
    pub fn order(&self) -> Vec<Scope> {
        self.providers.iter().map(|p| p.scope()).collect()
    }

    /// Initialize every scope, outer to inner.
    ///
    /// On failure the scopes already initialized are torn down in reverse.
    pub fn mount(self) -> std::result::Result<MountedStack, ProviderError> {
        let mut mounted = MountedStack {
            providers: Vec::with_capacity(self.providers.len()),
        };

        for mut provider in self.providers {
            let scope = provider.scope();
            if let Err(source) = provider.initialize() {
                warn!(?scope, error = %source, "Provider failed to initialize");
                // Dropping `mounted` tears down what was initialized
                return Err(ProviderError::Initialization { scope, source });
            }
            debug!(?scope, "scope initialized");
            mounted.providers.push(provider);
        }

        Ok(mounted)
    }
}

pub struct ProviderStackBuilder {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderStackBuilder {
    pub fn with(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn build(self) -> std::result::Result<ProviderStack, ProviderError> {
        let mut seen = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let scope = provider.scope();
            if seen.contains(&scope) {
                return Err(ProviderError::DuplicateScope(scope));
            }
            if let Some(missing) = provider.requires().iter().find(|r| !seen.contains(*r)) {
                return Err(ProviderError::MissingDependency {
                    scope,
                    missing: *missing,
                });
            }
            seen.push(scope);
        }

        if !self.providers.iter().any(|p| p.session().is_some()) {
            return Err(ProviderError::MissingSession);
        }

        Ok(ProviderStack {
            providers: self.providers,
        })
    }
}

/// An initialized stack; tears down inner to outer when dropped.
pub struct MountedStack {
    providers: Vec<Box<dyn Provider>>,
}

impl MountedStack {
    pub fn session(&self) -> Option<&SessionSource> {
        self.providers.iter().find_map(|p| p.session())
    }

    pub fn order(&self) -> Vec<Scope> {
        self.providers.iter().map(|p| p.scope()).collect()
    }

    /// Create the router inside the session scope's reach.
    ///
    /// Fails when a configured redirect target would redirect again.
    pub fn navigator(&self, config: ShellConfig, table: RouteTable) -> Result<Navigator> {
        let source = self.session().ok_or(ShellError::SessionUnavailable)?;
        check_targets(&table, &RedirectTargets::from_config(&config))?;
        Ok(Navigator::new(config, table, source.cell().clone()))
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for MountedStack {
    fn drop(&mut self) {
        while let Some(mut provider) = self.providers.pop() {
            provider.teardown();
            debug!(scope = ?provider.scope(), "scope torn down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryCredentials, Phase, SessionSnapshot};
    use std::sync::{Arc, Mutex};

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Recording {
        scope: Scope,
        requires: Vec<Scope>,
        fail: bool,
        journal: Journal,
    }

    impl Recording {
        fn new(scope: Scope, journal: &Journal) -> Self {
            Self {
                scope,
                requires: Vec::new(),
                fail: false,
                journal: journal.clone(),
            }
        }
    }

    impl Provider for Recording {
        fn scope(&self) -> Scope {
            self.scope
        }

        fn requires(&self) -> &[Scope] {
            &self.requires
        }

        fn initialize(&mut self) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("boom");
            }
            self.journal.lock().unwrap().push(format!("init {:?}", self.scope));
            Ok(())
        }

        fn teardown(&mut self) {
            self.journal.lock().unwrap().push(format!("teardown {:?}", self.scope));
        }
    }

    fn source() -> SessionSource {
        SessionSource::new(Arc::new(MemoryCredentials::new()))
    }

    #[test]
    fn test_standard_order() {
        let stack = ProviderStack::standard(source());
        assert_eq!(stack.order(), Scope::STANDARD_ORDER.to_vec());
        assert_eq!(stack.order().last(), Some(&Scope::Session));
    }

    #[test]
    fn test_mount_and_teardown_order() {
        let journal = Journal::default();
        let stack = ProviderStack::builder()
            .with(Recording::new(Scope::Theme, &journal))
            .with(Recording::new(Scope::Inventory, &journal))
            .with(SessionProvider::new(source()))
            .build()
            .unwrap();

        let mounted = stack.mount().unwrap();
        mounted.unmount();

        assert_eq!(
            *journal.lock().unwrap(),
            vec![
                "init Theme",
                "init Inventory",
                "teardown Inventory",
                "teardown Theme"
            ]
        );
    }

    #[test]
    fn test_failed_initialization_rolls_back() {
        let journal = Journal::default();
        let mut failing = Recording::new(Scope::Analytics, &journal);
        failing.fail = true;

        let stack = ProviderStack::builder()
            .with(Recording::new(Scope::Theme, &journal))
            .with(failing)
            .with(SessionProvider::new(source()))
            .build()
            .unwrap();

        let result = stack.mount();

        assert!(matches!(
            result,
            Err(ProviderError::Initialization {
                scope: Scope::Analytics,
                ..
            })
        ));
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["init Theme", "teardown Theme"]
        );
    }

    #[test]
    fn test_missing_session_rejected() {
        let result = ProviderStack::builder()
            .with(PassiveScope::new(Scope::Theme))
            .build();
        assert!(matches!(result, Err(ProviderError::MissingSession)));
    }

    #[test]
    fn test_duplicate_scope_rejected() {
        let result = ProviderStack::builder()
            .with(PassiveScope::new(Scope::Theme))
            .with(PassiveScope::new(Scope::Theme))
            .with(SessionProvider::new(source()))
            .build();
        assert!(matches!(
            result,
            Err(ProviderError::DuplicateScope(Scope::Theme))
        ));
    }

    #[test]
    fn test_dependency_must_come_first() {
        let journal = Journal::default();
        let mut matching = Recording::new(Scope::Matching, &journal);
        matching.requires = vec![Scope::Inventory];

        let result = ProviderStack::builder()
            .with(matching)
            .with(Recording::new(Scope::Inventory, &journal))
            .with(SessionProvider::new(source()))
            .build();

        assert!(matches!(
            result,
            Err(ProviderError::MissingDependency {
                scope: Scope::Matching,
                missing: Scope::Inventory,
            })
        ));
    }

    #[test]
    fn test_remount_passes_through_resolving() {
        let source = source();
        source.cell().settle(None);
        assert_eq!(source.cell().phase(), Phase::Anonymous);

        let mounted = ProviderStack::standard(source.clone()).mount().unwrap();

        assert_eq!(source.cell().snapshot(), SessionSnapshot::resolving());
        assert!(mounted.navigator(ShellConfig::default(), RouteTable::standard()).is_ok());
    }

    #[test]
    fn test_navigator_rejects_looping_target() {
        let mounted = ProviderStack::standard(source()).mount().unwrap();
        let config = ShellConfig {
            auth_path: "/".to_string(),
            ..ShellConfig::default()
        };

        let result = mounted.navigator(config, RouteTable::standard());

        assert!(matches!(
            result,
            Err(ShellError::UnreachableTarget { phase: Phase::Anonymous, .. })
        ));
    }
}
