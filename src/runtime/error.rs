use crate::builder::BuildError;
use crate::config::ConfigError;
use crate::pet::EventError;
use thiserror::Error;

/// Errors raised while starting or driving an engine.
///
/// Domain conditions such as ignored events or a halted pet are never
/// errors; see [`crate::machine::StepResult`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build transition table: {0}")]
    Table(#[from] BuildError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error("Engine must be started inside a Tokio runtime")]
    NoRuntime,

    #[error("Engine task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Session is not running")]
    NotRunning,
}
