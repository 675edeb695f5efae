//! Error types for the Autify CLI
//!
//! Messages are printed verbatim to the user, so they say what went wrong
//! and, where it helps, how to fix it.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Autify CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Precondition Errors ===
    #[error("Require {0} environment variable")]
    MissingCredential(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // === API Errors ===
    #[error("Unauthorized: Bad credentials")]
    Unauthorized,

    #[error("Autify API returned status {status} for {method} {url}")]
    Api {
        method: String,
        url: String,
        status: u16,
    },

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a network error for a request to `url`
    pub fn network(url: &str, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.to_string(),
            source,
        }
    }

    /// Create a decode error for a response from `url`
    pub fn decode(url: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.to_string(),
            source,
        }
    }

    /// Whether this error was raised before any request was sent
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::MissingCredential(_)
                | Error::InvalidArgument(_)
                | Error::Config(_)
                | Error::ConfigParse(_)
                | Error::FileRead { .. }
        )
    }
}
