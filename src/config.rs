//! Engine configuration.
//!
//! Only timing, history retention and the pet's lines are configurable;
//! guard thresholds and stat changes are fixed by the transition table.
//!
//! Validation uses Stillwater's `Validation` so every problem in a file is
//! reported at once instead of one per run.

use crate::pet::FUN_FACTS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Environment variable naming a config file for [`EngineConfig::load`].
pub const CONFIG_ENV: &str = "CHIMERA_CONFIG";

/// A single problem found while validating a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("tick_interval_ms must be greater than zero")]
    ZeroTickInterval,

    #[error("state_timeout_ms must be greater than zero")]
    ZeroStateTimeout,

    #[error("history_limit must be greater than zero")]
    ZeroHistoryLimit,

    #[error("fun_facts must contain at least one line")]
    NoFunFacts,

    #[error("fun_facts[{index}] is blank")]
    BlankFunFact { index: usize },
}

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {}", describe(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Settings for one engine instance.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```
/// use chimera::config::EngineConfig;
///
/// let config = EngineConfig::from_toml_str("tick_interval_ms = 1000").unwrap();
/// assert_eq!(config.tick_interval_ms, 1000);
/// assert_eq!(config.state_timeout_ms, 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Period of the `time_check` tick.
    pub tick_interval_ms: u64,
    /// Delay of the entry timers of `playing`, `enough_sleep` and
    /// `stomach_full`.
    pub state_timeout_ms: u64,
    /// Transitions retained in the engine's history.
    pub history_limit: usize,
    /// Lines the pet picks from when it starts playing.
    pub fun_facts: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 5000,
            state_timeout_ms: 5000,
            history_limit: 256,
            fun_facts: FUN_FACTS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    /// Load from `$CHIMERA_CONFIG` when set, otherwise use the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validated()
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        checks.push(require(self.tick_interval_ms > 0, ConfigViolation::ZeroTickInterval));
        checks.push(require(self.state_timeout_ms > 0, ConfigViolation::ZeroStateTimeout));
        checks.push(require(self.history_limit > 0, ConfigViolation::ZeroHistoryLimit));
        checks.push(require(!self.fun_facts.is_empty(), ConfigViolation::NoFunFacts));

        for (index, fact) in self.fun_facts.iter().enumerate() {
            checks.push(require(
                !fact.trim().is_empty(),
                ConfigViolation::BlankFunFact { index },
            ));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Return the config if valid, or every violation as one error.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn state_timeout(&self) -> Duration {
        Duration::from_millis(self.state_timeout_ms)
    }
}

fn require(
    holds: bool,
    violation: ConfigViolation,
) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}
