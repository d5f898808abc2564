//! Builder for constructing transition tables.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::State;
use crate::machine::{Transition, TransitionTable, Trigger};
use crate::pet::PetState;

/// Builder for transition tables with a fluent API.
///
/// Row order is significant: for a given state and trigger the first
/// row whose guard passes wins.
#[derive(Default)]
pub struct TransitionTableBuilder {
    transitions: Vec<Transition>,
}

impl TransitionTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the table.
    ///
    /// Every transient state must end its immediate chain with an
    /// unguarded fallback so it always resolves.
    pub fn build(self) -> Result<TransitionTable, BuildError> {
        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        for state in PetState::ALL.iter().filter(|s| s.is_transient()) {
            let fallback = self
                .transitions
                .iter()
                .rfind(|t| t.from == *state && t.trigger == Trigger::Always);
            if !fallback.is_some_and(|t| t.guard.is_none()) {
                return Err(BuildError::MissingFallback(state.name().to_string()));
            }
        }

        Ok(TransitionTable::new(self.transitions))
    }
}
