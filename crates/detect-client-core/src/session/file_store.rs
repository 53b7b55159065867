use anyhow::Context as _;
use detect_shared::const_config::client::CLIENT_AUTH_TOKEN_STORAGE_KEY;
use std::path::PathBuf;

use super::TokenStore;

/// Native stand in for browser local storage. The token is kept in a file
/// named after the storage key
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new<P: Into<PathBuf>>(folder: P) -> Self {
        Self {
            path: folder.into().join(CLIENT_AUTH_TOKEN_STORAGE_KEY),
        }
    }

    /// Uses a folder named `app_name` inside the user's config folder
    pub fn in_config_dir(app_name: &str) -> anyhow::Result<Self> {
        let config_dir = dirs::config_dir().context("unable to determine the config folder")?;
        Ok(Self::new(config_dir.join(app_name)))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let token = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read token file: {:?}", self.path))?;
        let token = token.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    fn save(&mut self, token: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create folder: {parent:?}"))?;
        }
        std::fs::write(&self.path, token)
            .with_context(|| format!("failed to write token file: {:?}", self.path))
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove token file: {:?}", self.path))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_folder(test_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "detect-client-core-{test_name}-{}",
            std::process::id()
        ))
    }

    #[test]
    fn save_load_clear() {
        let folder = temp_folder("save_load_clear");
        let mut store = FileTokenStore::new(&folder);
        assert_eq!(store.load().unwrap(), None);

        store.save("token-value").unwrap();
        assert!(store.path().ends_with("authToken"));
        assert_eq!(store.load().unwrap().as_deref(), Some("token-value"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().expect("clearing twice is fine");

        let _ = std::fs::remove_dir_all(folder);
    }
}
