//! Build errors for transition and table builders.

use thiserror::Error;

/// Errors that can occur when building transitions and tables.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition trigger not specified. Call .on(event), .after(delay) or .always()")]
    MissingTrigger,

    #[error("Transition target not specified. Call .to(state) or .stay()")]
    MissingTarget,

    #[error("State '{0}' is transient but has no unguarded immediate fallback")]
    MissingFallback(String),
}
