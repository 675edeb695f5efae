//! Configuration file locations
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/autify-cli/`
//! - macOS: `~/Library/Application Support/autify-cli/`
//! - Windows: `%APPDATA%\autify-cli\`

use std::path::PathBuf;

/// Name of the application directory
const APP_NAME: &str = "autify-cli";

/// Environment variable overriding the configuration file path
pub const CONFIG_ENV_NAME: &str = "ATF_CONFIG";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
///
/// `ATF_CONFIG` wins over the platform location when set and non-empty.
pub fn config_path() -> Option<PathBuf> {
    match std::env::var(CONFIG_ENV_NAME) {
        Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => config_dir().map(|dir| dir.join("config.toml")),
    }
}
