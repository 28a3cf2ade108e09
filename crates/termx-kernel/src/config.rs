//! Configuration for the termx console.
//!
//! Configuration is loaded from `~/.config/termx/config.toml`, then the
//! `TERMX_API_URL` environment variable, then command-line overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::vfs::VfsPath;

/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "TERMX_API_URL";

/// Configuration for the termx console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Backend base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Initial backend mode.
    #[serde(default = "default_use_backend")]
    pub use_backend: bool,

    /// Per-request HTTP timeout in milliseconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Home directory, wire form.
    #[serde(default = "default_home")]
    pub home: String,

    #[serde(default)]
    pub monitor: MonitorConfig,
}

/// Monitor refresh periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_remote_interval")]
    pub remote_interval_ms: u64,

    #[serde(default = "default_local_interval")]
    pub local_interval_ms: u64,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_use_backend() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    5_000
}

fn default_home() -> String {
    crate::session::DEFAULT_HOME.to_string()
}

fn default_remote_interval() -> u64 {
    2_000
}

fn default_local_interval() -> u64 {
    2_500
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            remote_interval_ms: default_remote_interval(),
            local_interval_ms: default_local_interval(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            use_backend: default_use_backend(),
            request_timeout_ms: default_request_timeout(),
            home: default_home(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl TerminalConfig {
    /// Load from the default path and apply the environment override.
    ///
    /// A missing config file is not an error.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => Self::load_from(&path)?,
            Ok(path) => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::debug!("No config directory ({e}), using defaults");
                Self::default()
            }
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.set_api_url(&url);
        }
        Ok(config)
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.api_url = normalize_url(&config.api_url);
        Ok(config)
    }

    /// Get the default config file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "termx")
            .context("Could not determine config directory")?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override the backend URL, stripping trailing slashes.
    pub fn set_api_url(&mut self, url: &str) {
        self.api_url = normalize_url(url);
    }

    pub fn home_path(&self) -> VfsPath {
        VfsPath::parse(&self.home)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn remote_interval(&self) -> Duration {
        Duration::from_millis(self.monitor.remote_interval_ms)
    }

    pub fn local_interval(&self) -> Duration {
        Duration::from_millis(self.monitor.local_interval_ms)
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
