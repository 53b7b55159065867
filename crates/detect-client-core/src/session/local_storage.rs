use anyhow::{anyhow, Context as _};
use detect_shared::const_config::client::CLIENT_AUTH_TOKEN_STORAGE_KEY;

use super::TokenStore;

/// Keeps the token in the browser's local storage under the same key the
/// server rendered pages use
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

fn storage() -> anyhow::Result<web_sys::Storage> {
    let window = web_sys::window().context("no window found")?;
    window
        .local_storage()
        .map_err(|e| anyhow!("failed to access local storage: {e:?}"))?
        .context("local storage is not available")
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        storage()?
            .get_item(CLIENT_AUTH_TOKEN_STORAGE_KEY)
            .map_err(|e| anyhow!("failed to read token: {e:?}"))
    }

    fn save(&mut self, token: &str) -> anyhow::Result<()> {
        storage()?
            .set_item(CLIENT_AUTH_TOKEN_STORAGE_KEY, token)
            .map_err(|e| anyhow!("failed to store token: {e:?}"))
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        storage()?
            .remove_item(CLIENT_AUTH_TOKEN_STORAGE_KEY)
            .map_err(|e| anyhow!("failed to remove token: {e:?}"))
    }
}
