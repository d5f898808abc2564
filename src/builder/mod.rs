//! Builder API for ergonomic transition table construction.
//!
//! This module provides fluent builders and macros for declaring states
//! and transition tables with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod table;
pub mod transition;

pub use error::BuildError;
pub use table::TransitionTableBuilder;
pub use transition::TransitionBuilder;

use crate::machine::{Target, Transition, Trigger};
use crate::pet::{EventKind, PetState};

/// Create an unguarded, action-free transition on an event.
///
/// # Example
///
/// ```
/// use chimera::builder::simple_transition;
/// use chimera::pet::{EventKind, PetState};
///
/// let transition = simple_transition(PetState::Paused, EventKind::TogglePause, PetState::HealthyNormal);
/// assert_eq!(transition.resolve_target(), PetState::HealthyNormal);
/// ```
pub fn simple_transition(from: PetState, on: EventKind, to: PetState) -> Transition {
    Transition {
        from,
        trigger: Trigger::Event(on),
        guard: None,
        target: Target::State(to),
        actions: Vec::new(),
    }
}

/// Create the `TOGGLE_PAUSE` row for every state the pause side-path is
/// reachable from.
pub fn pause_transitions() -> Vec<Transition> {
    PetState::ALL
        .iter()
        .filter(|s| s.can_pause())
        .map(|s| simple_transition(*s, EventKind::TogglePause, PetState::Paused))
        .collect()
}
