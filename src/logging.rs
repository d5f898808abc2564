//! Logging setup for hosts embedding the engine.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the host. These helpers install one with the output formats
//! the engine's logs are designed for.
//!
//! ```no_run
//! use chimera::logging::{LogFormat, LoggingConfig};
//!
//! LoggingConfig::new(LogFormat::Json, "chimera=debug".to_string(), false)
//!     .init()
//!     .unwrap();
//! ```

use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the output format for [`init_default`].
pub const LOG_FORMAT_ENV: &str = "CHIMERA_LOG_FORMAT";
/// Environment variable selecting the filter for [`init_default`].
pub const LOG_LEVEL_ENV: &str = "CHIMERA_LOG_LEVEL";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log format: '{0}'. Valid options: text, json, pretty")]
    InvalidFormat(String),

    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Plain single-line text.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
    /// Multi-line with colors, for development.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
}

impl LoggingConfig {
    /// `level` is an `EnvFilter` directive such as `info` or
    /// `chimera::runtime=trace`. `verbose` forces `debug`.
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
        }
    }

    /// The filter this config installs. `RUST_LOG` wins when set.
    pub fn filter(&self) -> EnvFilter {
        let directive = if self.verbose { "debug" } else { self.level.as_str() };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    }

    /// Install the global subscriber, writing to stderr.
    ///
    /// Fails if a subscriber is already installed.
    pub fn init(&self) -> Result<(), LoggingError> {
        let filter = self.filter();

        let installed = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .flatten_event(true)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(false)
                .try_init(),
        };

        installed.map_err(|e| LoggingError::Install(e.to_string()))
    }
}

/// Install a subscriber configured from `CHIMERA_LOG_FORMAT` and
/// `CHIMERA_LOG_LEVEL`, defaulting to text at `info`.
///
/// An unparseable format falls back to text.
pub fn init_default() -> Result<(), LoggingError> {
    let format = std::env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();

    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());

    LoggingConfig::new(format, level, false).init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_from_str_invalid() {
        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert!(matches!(err, LoggingError::InvalidFormat(ref f) if f == "xml"));
        assert!(err.to_string().contains("Valid options"));
    }

    #[test]
    fn test_log_format_display_round_trips() {
        for format in [LogFormat::Text, LogFormat::Json, LogFormat::Pretty] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_second_init_fails_instead_of_panicking() {
        let config = LoggingConfig::new(LogFormat::Text, "warn".to_string(), false);
        let _ = config.init();
        assert!(matches!(config.init(), Err(LoggingError::Install(_))));
    }
}
