//! Configuration loaded from `portfolio.toml`.
//!
//! Every key is optional; a missing file means all defaults. Command-line
//! flags are applied on top by the binaries.

use crate::fetch::RetryPolicy;
use crate::url_validator::DEFAULT_ALLOWED_HOSTS;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE: &str = "portfolio.toml";
pub const DEFAULT_DATA_FILE: &str = "site/data.js";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "site/static";
pub const DEFAULT_TITLE: &str = "Portfolio";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_file: PathBuf,
    pub server: ServerConfig,
    pub updater: UpdaterConfig,
    /// Extra or replacement entries for the built-in title → URL table.
    pub publication_urls: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            server: ServerConfig::default(),
            updater: UpdaterConfig::default(),
            publication_urls: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub static_dir: PathBuf,
    /// Custom page shell; the built-in one is used when unset.
    pub shell: Option<PathBuf>,
    pub title: String,
    /// Embed the stylesheet into the page. Turn off when the shell links
    /// its own.
    pub inline_style: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            shell: None,
            title: DEFAULT_TITLE.to_string(),
            inline_style: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    pub rate_limit_delay_ms: u64,
    pub max_attempts: u32,
    pub rate_limited_backoff_ms: u64,
    pub network_backoff_ms: u64,
    pub request_timeout_secs: u64,
    pub max_plausible_citations: u32,
    pub user_agent: String,
    pub allowed_hosts: Vec<String>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            rate_limit_delay_ms: 5000,
            max_attempts: 3,
            rate_limited_backoff_ms: 10_000,
            network_backoff_ms: 2000,
            request_timeout_secs: 30,
            max_plausible_citations: 10_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allowed_hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl UpdaterConfig {
    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            rate_limited_backoff: Duration::from_millis(self.rate_limited_backoff_ms),
            network_backoff: Duration::from_millis(self.network_backoff_ms),
        }
    }
}

impl Config {
    /// Load from `path` if given (it must exist), otherwise from
    /// `portfolio.toml` in the working directory when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
