//! Application configuration.
//!
//! Values are layered: built-in defaults, then `~/.config/wvw-tui/config.toml`,
//! then `WVW_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Directory under the user config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "wvw-tui";
/// Public game API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.guildwars2.com";
/// Match shown when nothing else is selected.
pub const DEFAULT_MATCH_ID: &str = "2-1";

const DEFAULT_CONFIG_TOML: &str = r#"# wvw-tui configuration

# Base URL of the game API.
api_base_url = "https://api.guildwars2.com"

# User-Agent header sent with every request.
# user_agent = "wvw-tui/0.1"

# Match detail shown on startup.
default_match_id = "2-1"
"#;

/// Runtime settings shared by the client and the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the game API, without a trailing slash.
    pub api_base_url: String,
    /// User-Agent header value.
    pub user_agent: String,
    /// Match whose detail is mounted at startup.
    pub default_match_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            default_match_id: DEFAULT_MATCH_ID.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the default config file and environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path().as_deref())
    }

    /// Load from an explicit file (optional) and the environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let defaults = AppConfig::default();
        let mut builder = Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("user_agent", defaults.user_agent)?
            .set_default("default_match_id", defaults.default_match_id)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let mut config: AppConfig = builder
            .add_source(Environment::with_prefix("WVW"))
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("failed to deserialize configuration")?;

        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        Ok(config)
    }
}

/// Location of `config.toml`, if a user config dir exists.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join("config.toml"))
}

/// Write a commented default config file when none exists yet.
pub fn ensure_default_config() -> Result<()> {
    match config_path() {
        Some(path) => write_default_config(&path),
        None => Ok(()),
    }
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write default config {}", path.display()))
}

fn default_user_agent() -> String {
    format!("wvw-tui/{}", env!("CARGO_PKG_VERSION"))
}
