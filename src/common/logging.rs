//! Logging and tracing configuration
//!
//! Logs go to stderr; stdout is reserved for the JSON documents the
//! commands print.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::LogConfig;

/// Log settings resolved once at startup from config and CLI flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Level for this crate's events
    pub level: String,
    /// Filter taken from `RUST_LOG`, replacing `level` when set
    pub env_filter: Option<String>,
}

impl LogSettings {
    /// Resolve settings; `--debug` overrides the configured level
    pub fn resolve(config: &LogConfig, debug: bool) -> Self {
        let level = if debug {
            "debug".to_string()
        } else {
            config.level.to_ascii_lowercase()
        };
        Self {
            level,
            env_filter: None,
        }
    }

    /// Use a `RUST_LOG` value in place of the resolved level
    pub fn with_env_filter(mut self, filter: Option<String>) -> Self {
        self.env_filter = filter.filter(|f| !f.trim().is_empty());
        self
    }

    /// Filter directive: `RUST_LOG` if set, otherwise our level for this
    /// crate and WARN for dependencies unless this crate is quieter
    pub fn directive(&self) -> String {
        if let Some(filter) = &self.env_filter {
            return filter.clone();
        }
        match self.level.as_str() {
            "error" | "off" => format!("atf={},error", self.level),
            level => format!("atf={},warn", level),
        }
    }

    /// Whether debug (or more detailed) events are emitted
    ///
    /// Detailed logs interleave with the spinner, so callers turn the
    /// spinner off when this is true.
    pub fn is_verbose(&self) -> bool {
        self.filter()
            .max_level_hint()
            .is_some_and(|level| level >= LevelFilter::DEBUG)
    }

    /// The filter actually installed; an unparsable `RUST_LOG` falls back
    /// to the resolved level
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.directive()).unwrap_or_else(|_| {
            let fallback = Self {
                env_filter: None,
                ..self.clone()
            };
            EnvFilter::new(fallback.directive())
        })
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self::resolve(&LogConfig::default(), false)
    }
}

/// Initialize tracing for the CLI (stderr logging)
pub fn init_cli(settings: &LogSettings) {
    tracing_subscriber::registry()
        .with(settings.filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_quiet() {
        let settings = LogSettings::default();
        assert_eq!(settings.directive(), "atf=error,error");
        assert!(!settings.is_verbose());
    }

    #[test]
    fn test_debug_flag_overrides_config() {
        let config = LogConfig {
            level: "warn".to_string(),
        };
        let settings = LogSettings::resolve(&config, true);
        assert_eq!(settings.directive(), "atf=debug,warn");
        assert!(settings.is_verbose());
    }

    #[test]
    fn test_configured_level_is_normalised() {
        let config = LogConfig {
            level: "INFO".to_string(),
        };
        let settings = LogSettings::resolve(&config, false);
        assert_eq!(settings.level, "info");
        assert!(!settings.is_verbose());
    }

    #[test]
    fn test_rust_log_override_counts_as_verbose() {
        let settings = LogSettings::default().with_env_filter(Some("debug".to_string()));
        assert_eq!(settings.directive(), "debug");
        assert!(settings.is_verbose());

        let settings = LogSettings::default().with_env_filter(Some("atf=trace".to_string()));
        assert!(settings.is_verbose());
    }

    #[test]
    fn test_quiet_rust_log_override_wins_over_debug_flag() {
        let settings = LogSettings::resolve(&LogConfig::default(), true)
            .with_env_filter(Some("warn".to_string()));
        assert!(!settings.is_verbose());
    }

    #[test]
    fn test_empty_rust_log_is_ignored() {
        let settings = LogSettings::default().with_env_filter(Some("  ".to_string()));
        assert!(settings.env_filter.is_none());
        assert_eq!(settings.directive(), "atf=error,error");
    }
}
