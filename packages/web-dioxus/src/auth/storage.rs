//! Credential persistence for the session source.
//!
//! In the browser the signed-in user is kept in `localStorage`; other
//! targets keep it in memory for the lifetime of the process.

use std::sync::Arc;

use harvest_shell::CredentialStore;

/// `localStorage` key holding the serialized user.
pub const CREDENTIAL_KEY: &str = "harvest.session.user";

/// The credential store for the current target.
#[cfg(feature = "web")]
pub fn credential_store() -> Arc<dyn CredentialStore> {
    Arc::new(browser::LocalStorageCredentials::new(CREDENTIAL_KEY))
}

#[cfg(not(feature = "web"))]
pub fn credential_store() -> Arc<dyn CredentialStore> {
    Arc::new(harvest_shell::MemoryCredentials::new())
}

#[cfg(feature = "web")]
mod browser {
    use anyhow::{anyhow, Context, Result};
    use async_trait::async_trait;
    use harvest_shell::{CredentialStore, User};

    /// Credential store backed by `window.localStorage`.
    ///
    /// Browser handles are not `Send`, so each operation opens storage,
    /// finishes synchronously, and holds nothing across an await.
    #[derive(Debug, Clone)]
    pub struct LocalStorageCredentials {
        key: String,
    }

    impl LocalStorageCredentials {
        pub fn new(key: impl Into<String>) -> Self {
            Self { key: key.into() }
        }

        fn read(&self) -> Result<Option<User>> {
            let raw = storage()?
                .get_item(&self.key)
                .map_err(|e| anyhow!("localStorage read failed: {:?}", e))?;

            match raw {
                Some(raw) => {
                    let user = serde_json::from_str(&raw)
                        .context("Stored credential is not a valid user")?;
                    Ok(Some(user))
                }
                None => Ok(None),
            }
        }

        fn write(&self, user: &User) -> Result<()> {
            let raw = serde_json::to_string(user).context("Failed to serialize user")?;
            storage()?
                .set_item(&self.key, &raw)
                .map_err(|e| anyhow!("localStorage write failed: {:?}", e))
        }

        fn remove(&self) -> Result<()> {
            storage()?
                .remove_item(&self.key)
                .map_err(|e| anyhow!("localStorage remove failed: {:?}", e))
        }
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .context("No window")?
            .local_storage()
            .map_err(|e| anyhow!("localStorage unavailable: {:?}", e))?
            .context("localStorage disabled")
    }

    #[async_trait]
    impl CredentialStore for LocalStorageCredentials {
        async fn load(&self) -> Result<Option<User>> {
            self.read()
        }

        async fn store(&self, user: &User) -> Result<()> {
            self.write(user)
        }

        async fn clear(&self) -> Result<()> {
            self.remove()
        }
    }
}
