//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};

/// Environment variable holding the personal access token
pub const ACCESS_TOKEN_ENV_NAME: &str = "AUTIFY_PERSONAL_ACCESS_TOKEN";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV_NAME: &str = "AUTIFY_BASE_URL";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Defaults for the `run` command
    #[serde(default)]
    pub run: RunDefaults,

    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// API connection settings
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Autify REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for a single HTTP request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://app.autify.com/api/v1".to_string()
}
fn default_request_timeout() -> u64 {
    30
}

/// Defaults for the `run` command, overridden by its flags
#[derive(Debug, Deserialize)]
pub struct RunDefaults {
    /// Seconds between two status polls
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Minutes to wait for a terminal status
    #[serde(default = "default_timeout")]
    pub timeout_minutes: u64,

    /// Draw a spinner while waiting
    #[serde(default = "default_spinner")]
    pub spinner: bool,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            timeout_minutes: default_timeout(),
            spinner: default_spinner(),
        }
    }
}

fn default_interval() -> u64 {
    3
}
fn default_timeout() -> u64 {
    3
}
fn default_spinner() -> bool {
    true
}

/// Logging settings
#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// Level for this crate's events (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "error".to_string()
}

impl Config {
    /// Load configuration from the default config file, then apply
    /// environment overrides
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides(std::env::var(BASE_URL_ENV_NAME).ok());
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Apply values taken from the environment
    pub fn apply_env_overrides(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            self.api.base_url = url;
        }
    }
}

/// Read the access token from the environment
///
/// An unset or empty variable is a fatal precondition for every API command.
pub fn access_token() -> Result<String> {
    match std::env::var(ACCESS_TOKEN_ENV_NAME) {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => Err(Error::MissingCredential(ACCESS_TOKEN_ENV_NAME)),
    }
}
