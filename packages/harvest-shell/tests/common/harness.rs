use std::sync::Arc;

use async_trait::async_trait;
use harvest_shell::{
    CredentialStore, MemoryCredentials, MountedStack, Navigator, ProviderStack, RouteTable,
    SessionSource, ShellConfig, User,
};
use tokio::sync::Notify;

pub fn test_user() -> User {
    User::new("Test Volunteer", "volunteer@example.com")
}

/// Credential store whose `clear` waits until released, so a logout can be
/// observed mid-resolution.
pub struct GatedCredentials {
    inner: MemoryCredentials,
    gate: Arc<Notify>,
}

impl GatedCredentials {
    pub fn new(inner: MemoryCredentials) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (
            Self {
                inner,
                gate: gate.clone(),
            },
            gate,
        )
    }
}

#[async_trait]
impl CredentialStore for GatedCredentials {
    async fn load(&self) -> anyhow::Result<Option<User>> {
        self.inner.load().await
    }

    async fn store(&self, user: &User) -> anyhow::Result<()> {
        self.inner.store(user).await
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.gate.notified().await;
        self.inner.clear().await
    }
}

/// A mounted provider stack with a navigator, as the application root builds it.
pub struct ShellHarness {
    pub source: SessionSource,
    pub navigator: Navigator,
    // Keeps the scopes mounted for the test's lifetime
    _mounted: MountedStack,
}

impl ShellHarness {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self::with_config(store, ShellConfig::default())
    }

    pub fn with_config(store: Arc<dyn CredentialStore>, config: ShellConfig) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("harvest_shell=debug")
            .with_test_writer()
            .try_init();

        let source = SessionSource::new(store);
        let mounted = ProviderStack::standard(source.clone())
            .mount()
            .expect("Failed to mount provider stack");
        let navigator = mounted
            .navigator(config, RouteTable::standard())
            .expect("Failed to create navigator");

        Self {
            source,
            navigator,
            _mounted: mounted,
        }
    }

    /// Harness whose session resolves anonymous.
    pub async fn anonymous() -> Self {
        let harness = Self::new(Arc::new(MemoryCredentials::new()));
        harness.source.resolve().await;
        harness
    }

    /// Harness whose session resolves to `user`.
    pub async fn signed_in(user: User) -> Self {
        let harness = Self::new(Arc::new(MemoryCredentials::with_user(user)));
        harness.source.resolve().await;
        harness
    }
}
