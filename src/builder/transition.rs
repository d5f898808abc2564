//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::Guard;
use crate::machine::{Action, Target, Transition, Trigger};
use crate::pet::{EventKind, PetContext, PetState};
use std::time::Duration;

/// Builder for constructing transitions with a fluent API.
///
/// # Example
///
/// ```
/// use chimera::builder::TransitionBuilder;
/// use chimera::machine::Action;
/// use chimera::pet::{guards, EventKind, PetState};
///
/// let transition = TransitionBuilder::new()
///     .from(PetState::HealthyNormal)
///     .on(EventKind::Play)
///     .guard(guards::play_guard())
///     .to(PetState::Playing)
///     .action(Action::AdjustEnergy(-3))
///     .build()
///     .unwrap();
///
/// assert_eq!(transition.actions.len(), 1);
/// ```
#[derive(Default)]
pub struct TransitionBuilder {
    from: Option<PetState>,
    trigger: Option<Trigger>,
    guard: Option<Guard<PetContext>>,
    target: Option<Target>,
    actions: Vec<Action>,
}

impl TransitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source state (required).
    pub fn from(mut self, state: PetState) -> Self {
        self.from = Some(state);
        self
    }

    /// Fire on an event of this kind.
    pub fn on(mut self, kind: EventKind) -> Self {
        self.trigger = Some(Trigger::Event(kind));
        self
    }

    /// Fire when the source state's entry timer elapses.
    pub fn after(mut self, delay: Duration) -> Self {
        self.trigger = Some(Trigger::After(delay));
        self
    }

    /// Fire immediately on entering the source state.
    pub fn always(mut self) -> Self {
        self.trigger = Some(Trigger::Always);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<PetContext>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, name: &'static str, predicate: F) -> Self
    where
        F: Fn(&PetContext) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(name, predicate));
        self
    }

    /// Set the target state.
    pub fn to(mut self, state: PetState) -> Self {
        self.target = Some(Target::State(state));
        self
    }

    /// Stay in the source state (targetless transition).
    pub fn stay(mut self) -> Self {
        self.target = Some(Target::Stay);
        self
    }

    /// Append an action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Append several actions, keeping their order.
    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let trigger = self.trigger.ok_or(BuildError::MissingTrigger)?;
        let target = self.target.ok_or(BuildError::MissingTarget)?;

        Ok(Transition {
            from,
            trigger,
            guard: self.guard,
            target,
            actions: self.actions,
        })
    }
}
