//! Core state machine types and logic.
//!
//! This module contains the pure functional core shared by every machine
//! in the crate:
//! - State definitions via the `State` trait
//! - Named guard predicates over a context
//! - Immutable history tracking
//!
//! Nothing here performs I/O.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
