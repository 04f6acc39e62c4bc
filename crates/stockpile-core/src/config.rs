use crate::persist::DEFAULT_KEY;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "STOCKPILE_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the item blob. Unset means the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_key")]
    pub key: String,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    #[serde(default)]
    pub durable: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: default_key(),
            lock_timeout_ms: default_lock_timeout_ms(),
            durable: false,
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a status-line notification stays visible.
    #[serde(default = "default_status_seconds")]
    pub status_seconds: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            status_seconds: default_status_seconds(),
        }
    }
}

impl UiConfig {
    #[must_use]
    pub const fn status_duration(&self) -> Duration {
        Duration::from_secs(self.status_seconds)
    }
}

/// Default config file location: `<config_dir>/stockpile/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stockpile/config.toml"))
}

/// Load config from `path` (or the default location). A missing file yields
/// defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<Config>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the data directory.
///
/// Precedence: `cli_override` > `STOCKPILE_DATA_DIR` > `storage.data_dir` >
/// `<data_dir>/stockpile` > `./.stockpile`.
#[must_use]
pub fn resolve_data_dir(config: &Config, cli_override: Option<&Path>) -> PathBuf {
    resolve_data_dir_inner(
        config,
        cli_override,
        env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        dirs::data_dir(),
    )
}

fn resolve_data_dir_inner(
    config: &Config,
    cli_override: Option<&Path>,
    env_dir: Option<PathBuf>,
    platform_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = cli_override {
        return dir.to_path_buf();
    }
    if let Some(dir) = env_dir.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    if let Some(dir) = &config.storage.data_dir {
        return dir.clone();
    }
    platform_dir.map_or_else(|| PathBuf::from(".stockpile"), |dir| dir.join("stockpile"))
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

const fn default_lock_timeout_ms() -> u64 {
    2_000
}

const fn default_status_seconds() -> u64 {
    3
}
