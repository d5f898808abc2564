//! Transition entries: trigger, guard, target and ordered actions.

use crate::core::Guard;
use crate::pet::{adjust_stat, EventKind, FunFactSource, Mood, PetContext, PetEvent, PetState};
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

/// What makes a transition eligible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// An event of this kind was delivered.
    Event(EventKind),
    /// The state-entry timer of the source state fired.
    After(Duration),
    /// Evaluated as soon as the source state is entered.
    Always,
}

impl Trigger {
    /// Whether a delivered trigger selects this entry. Timers match by
    /// kind only; the delay is a property of the entry.
    pub fn matches(&self, other: &Trigger) -> bool {
        match (self, other) {
            (Trigger::Event(a), Trigger::Event(b)) => a == b,
            (Trigger::After(_), Trigger::After(_)) => true,
            (Trigger::Always, Trigger::Always) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Event(kind) => write!(f, "{}", kind),
            Trigger::After(delay) => write!(f, "after({}ms)", delay.as_millis()),
            Trigger::Always => write!(f, "always"),
        }
    }
}

/// Where a transition leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Enter this state. Entering the current state again re-arms its
    /// timer.
    State(PetState),
    /// Stay in the current state without re-entering it.
    Stay,
}

/// A context-mutating step run when a transition fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    AdjustEnergy(i8),
    AdjustHunger(i8),
    SetMood(Mood),
    /// Update `last_food` and the same-food streak from the event's food.
    TrackFood,
    /// Store a line from the fun-fact source.
    PickFunFact,
    /// Ask the host to tear the engine down and build a fresh one.
    RequestRestart,
}

impl Action {
    pub fn apply(&self, ctx: &mut PetContext, event: Option<&PetEvent>, facts: &dyn FunFactSource) {
        match *self {
            Action::AdjustEnergy(change) => ctx.energy = adjust_stat(ctx.energy, change),
            Action::AdjustHunger(change) => ctx.hunger = adjust_stat(ctx.hunger, change),
            Action::SetMood(mood) => ctx.mood = mood,
            Action::TrackFood => match event.and_then(PetEvent::food) {
                Some(food) => ctx.track_food(food),
                None => warn!("track_food ran without a food payload, skipping"),
            },
            Action::PickFunFact => ctx.current_fun_fact = facts.pick(),
            Action::RequestRestart => info!("restart requested from pause"),
        }
    }
}

/// One row of the transition table.
#[derive(Clone, Debug)]
pub struct Transition {
    pub from: PetState,
    pub trigger: Trigger,
    pub guard: Option<Guard<PetContext>>,
    pub target: Target,
    pub actions: Vec<Action>,
}

impl Transition {
    /// Check if this row applies to the given state, trigger and context.
    pub fn can_execute(&self, current: PetState, trigger: &Trigger, ctx: &PetContext) -> bool {
        if current != self.from || !self.trigger.matches(trigger) {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(ctx))
    }

    /// Run the actions in order against a copy of `ctx`, producing the
    /// context that replaces it.
    pub fn apply(
        &self,
        ctx: &PetContext,
        event: Option<&PetEvent>,
        facts: &dyn FunFactSource,
    ) -> PetContext {
        let mut next = ctx.clone();
        for action in &self.actions {
            action.apply(&mut next, event, facts);
        }
        next
    }

    /// The state this row leads to when taken from `from`.
    pub fn resolve_target(&self) -> PetState {
        match self.target {
            Target::State(state) => state,
            Target::Stay => self.from,
        }
    }
}
