//! The pet machine: a data-driven transition table and its evaluator.
//!
//! Everything here is synchronous. Timers, the periodic tick and derived
//! events live in [`crate::runtime`], which drives a [`PetMachine`] one
//! trigger at a time.

mod pet_machine;
mod snapshot;
mod table;
mod transition;

pub use pet_machine::{PetMachine, StepResult};
pub use snapshot::{HungerLevel, Snapshot};
pub use table::{TransitionTable, DEFAULT_STATE_TIMEOUT};
pub use transition::{Action, Target, Transition, Trigger};
