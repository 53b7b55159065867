//! Settings for the client
//!
//! Natively they are layered: built-in defaults, then the optional
//! `configuration/client.toml`, then environment variables prefixed with `APP_`
//! (e.g. `APP_SERVER_ADDRESS`) and finally the `--server` argument. On the web
//! the page's origin is used as the server address.

use detect_shared::const_config::client::{
    CLIENT_DEFAULT_SERVER_ADDRESS, CLIENT_NOTIFICATION_TIMEOUT_SECS,
};
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub server_address: String,
    pub notification_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_server_address(CLIENT_DEFAULT_SERVER_ADDRESS.to_string())
    }
}

impl Settings {
    pub fn with_server_address(server_address: String) -> Self {
        Self {
            server_address,
            notification_timeout_secs: CLIENT_NOTIFICATION_TIMEOUT_SECS,
        }
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_configuration(server_override: Option<String>) -> anyhow::Result<Settings> {
    use anyhow::Context as _;
    let base_path = std::env::current_dir().context("failed to determine the current directory")?;
    load_settings(&base_path.join("configuration"), server_override)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(
    configuration_directory: &std::path::Path,
    server_override: Option<String>,
) -> anyhow::Result<Settings> {
    use anyhow::Context as _;
    let settings = config::Config::builder()
        .set_default("server_address", CLIENT_DEFAULT_SERVER_ADDRESS)?
        .set_default("notification_timeout_secs", CLIENT_NOTIFICATION_TIMEOUT_SECS)?
        .add_source(
            config::File::from(configuration_directory.join("client.toml")).required(false),
        )
        // E.g. `APP_SERVER_ADDRESS=http://10.0.0.2:8000` sets `Settings.server_address`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("server_address", server_override)?
        .build()
        .context("failed to build settings")?;

    settings
        .try_deserialize::<Settings>()
        .context("failed to deserialize settings")
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "detect-client-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_without_file() {
        let dir = scratch_dir("no-file");
        let settings = load_settings(&dir, None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.notification_timeout(), Duration::from_secs(6));
    }

    #[test]
    fn file_then_override() {
        let dir = scratch_dir("with-file");
        std::fs::write(
            dir.join("client.toml"),
            "server_address = \"http://from-file:8000\"\nnotification_timeout_secs = 10\n",
        )
        .unwrap();

        let from_file = load_settings(&dir, None).unwrap();
        assert_eq!(from_file.server_address, "http://from-file:8000");
        assert_eq!(from_file.notification_timeout_secs, 10);

        let overridden = load_settings(&dir, Some("http://cli:9000".to_string())).unwrap();
        assert_eq!(overridden.server_address, "http://cli:9000");
        assert_eq!(overridden.notification_timeout_secs, 10);
    }
}
