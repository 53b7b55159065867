//! The bearer token of the logged in user and where it is persisted between
//! runs

use detect_shared::{log_err_as_warn, token::AuthToken};
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileTokenStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageTokenStore;

/// Persists the token so a restart (or page reload) keeps the user logged in
pub trait TokenStore: Debug {
    fn load(&self) -> anyhow::Result<Option<String>>;
    fn save(&mut self, token: &str) -> anyhow::Result<()>;
    fn clear(&mut self) -> anyhow::Result<()>;
}

/// Keeps the token in memory only. Clones share the same slot which allows
/// simulating a reload by building a new [`Session`] from a clone
#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn with_token<S: Into<String>>(token: S) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.slot.lock().expect("mutex poisoned").clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        Ok(self.stored())
    }

    fn save(&mut self, token: &str) -> anyhow::Result<()> {
        *self.slot.lock().expect("mutex poisoned") = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        *self.slot.lock().expect("mutex poisoned") = None;
        Ok(())
    }
}

/// The single piece of long lived state: the token (if any) that
/// authenticated requests are sent with
pub struct Session {
    token: Option<AuthToken>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Starts a session from whatever the store has persisted. Failure to read
    /// the store is treated as not being logged in
    #[tracing::instrument]
    pub fn restore<S: TokenStore + 'static>(store: S) -> Self {
        let token = match store.load() {
            Ok(token) => token.filter(|t| !t.is_empty()).map(AuthToken::from),
            Err(e) => {
                warn!(?e, "failed to load persisted token");
                None
            }
        };
        info!(has_token = token.is_some(), "session restored");
        Self {
            token,
            store: Box::new(store),
        }
    }

    /// A session that forgets the token when dropped
    pub fn in_memory() -> Self {
        Self::restore(MemoryTokenStore::default())
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[tracing::instrument(skip(token))]
    pub fn set_token(&mut self, token: AuthToken) {
        log_err_as_warn!(self.store.save(token.bearer()));
        self.token = Some(token);
    }

    #[tracing::instrument]
    pub fn clear(&mut self) {
        log_err_as_warn!(self.store.clear());
        self.token = None;
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("is_authenticated", &self.is_authenticated())
            .field("store", &self.store)
            .finish()
    }
}
