//! Core State trait for state machine states.
//!
//! All state machine states implement this trait, which provides pure
//! methods for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. A state is an immutable value describing the
/// active node of a machine; the data that changes over time lives in a
/// separate context.
///
/// # Example
///
/// ```rust
/// use chimera::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum LampState {
///     Off,
///     Warming,
///     Burnt,
/// }
///
/// impl State for LampState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "off",
///             Self::Warming => "warming",
///             Self::Burnt => "burnt",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Burnt)
///     }
///
///     fn is_transient(&self) -> bool {
///         matches!(self, Self::Warming)
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// No event-driven transitions leave a final state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is a transient state.
    ///
    /// A transient state is resolved by its immediate transitions in the
    /// same step it is entered, so it is never observed as settled.
    ///
    /// Default implementation returns `false`.
    fn is_transient(&self) -> bool {
        false
    }
}
