//! The data-driven transition table and the pet's standard rules.

use crate::builder::{pause_transitions, simple_transition, BuildError, TransitionBuilder, TransitionTableBuilder};
use crate::machine::transition::{Action, Transition, Trigger};
use crate::pet::{guards, EventKind, Mood, PetContext, PetState};
use std::time::Duration;

/// Delay of the state-entry timers in the standard table.
pub const DEFAULT_STATE_TIMEOUT: Duration = Duration::from_millis(5000);

const PLAY: [Action; 3] = [
    Action::AdjustEnergy(-3),
    Action::SetMood(Mood::Happy),
    Action::PickFunFact,
];
const TICK: [Action; 2] = [Action::AdjustEnergy(-1), Action::AdjustHunger(1)];
const EAT: [Action; 2] = [Action::AdjustHunger(-3), Action::TrackFood];
const OVERFED: [Action; 3] = [
    Action::SetMood(Mood::Grumpy),
    Action::AdjustHunger(5),
    Action::AdjustEnergy(-5),
];

/// Ordered list of transition rows.
///
/// Lookup is first-match-wins over the rows whose source state and
/// trigger match, so guarded rows must precede their fallback.
#[derive(Clone, Debug)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    pub(crate) fn new(transitions: Vec<Transition>) -> Self {
        Self { transitions }
    }

    /// The pet's rules with state-entry timers of `state_timeout`.
    pub fn standard(state_timeout: Duration) -> Result<Self, BuildError> {
        TransitionTableBuilder::new()
            // healthy_normal
            .transition(
                TransitionBuilder::new()
                    .from(PetState::HealthyNormal)
                    .on(EventKind::Play)
                    .guard(guards::play_guard())
                    .to(PetState::Playing)
                    .actions(PLAY),
            )?
            .add_transition(simple_transition(
                PetState::HealthyNormal,
                EventKind::Feed,
                PetState::FoodSelection,
            ))
            .transition(
                TransitionBuilder::new()
                    .from(PetState::HealthyNormal)
                    .on(EventKind::MakesSleep)
                    .to(PetState::EnoughSleep)
                    .action(Action::AdjustEnergy(3)),
            )?
            .transition(
                TransitionBuilder::new()
                    .from(PetState::HealthyNormal)
                    .on(EventKind::TimeCheck)
                    .guard(guards::grumpy_guard())
                    .to(PetState::MoodGrumpy)
                    .actions(TICK)
                    .action(Action::SetMood(Mood::Grumpy)),
            )?
            .transition(
                TransitionBuilder::new()
                    .from(PetState::HealthyNormal)
                    .on(EventKind::TimeCheck)
                    .stay()
                    .actions(TICK),
            )?
            // playing
            .transition(
                TransitionBuilder::new()
                    .from(PetState::Playing)
                    .after(state_timeout)
                    .to(PetState::RecoveredStatus),
            )?
            // food_selection
            .transition(
                TransitionBuilder::new()
                    .from(PetState::FoodSelection)
                    .on(EventKind::PlayerSelecting)
                    .to(PetState::StomachFull)
                    .actions(EAT),
            )?
            .add_transition(simple_transition(
                PetState::FoodSelection,
                EventKind::CancelFeed,
                PetState::HealthyNormal,
            ))
            // enough_sleep
            .transition(
                TransitionBuilder::new()
                    .from(PetState::EnoughSleep)
                    .after(state_timeout)
                    .to(PetState::HealthyNormal),
            )?
            // mood_grumpy
            .transition(
                TransitionBuilder::new()
                    .from(PetState::MoodGrumpy)
                    .on(EventKind::TimeCheck)
                    .guard(guards::sick_guard())
                    .to(PetState::SickGrumpy)
                    .actions(TICK),
            )?
            .transition(
                TransitionBuilder::new()
                    .from(PetState::MoodGrumpy)
                    .on(EventKind::TimeCheck)
                    .stay()
                    .actions(TICK),
            )?
            .transition(
                TransitionBuilder::new()
                    .from(PetState::MoodGrumpy)
                    .on(EventKind::Play)
                    .guard(guards::play_guard())
                    .to(PetState::Playing)
                    .actions(PLAY),
            )?
            .transition(
                TransitionBuilder::new()
                    .from(PetState::MoodGrumpy)
                    .on(EventKind::MakesSleep)
                    .to(PetState::RecoveredStatus)
                    .action(Action::AdjustEnergy(3)),
            )?
            .add_transition(simple_transition(
                PetState::MoodGrumpy,
                EventKind::Feed,
                PetState::FoodSelectionGrumpy,
            ))
            // stomach_full
            .transition(
                TransitionBuilder::new()
                    .from(PetState::StomachFull)
                    .after(state_timeout)
                    .to(PetState::HealthyNormal),
            )?
            .transition(
                TransitionBuilder::new()
                    .from(PetState::StomachFull)
                    .on(EventKind::RepeatSameFood3Times)
                    .to(PetState::MoodGrumpy)
                    .actions(OVERFED),
            )?
            // recovered_status
            .transition(
                TransitionBuilder::new()
                    .from(PetState::RecoveredStatus)
                    .always()
                    .guard(guards::healthy_guard())
                    .to(PetState::HealthyNormal),
            )?
            .transition(
                TransitionBuilder::new()
                    .from(PetState::RecoveredStatus)
                    .always()
                    .guard(guards::grumpy_guard())
                    .to(PetState::MoodGrumpy),
            )?
            .transition(
                TransitionBuilder::new()
                    .from(PetState::RecoveredStatus)
                    .always()
                    .to(PetState::MoodGrumpy),
            )?
            // food_selection_grumpy
            .transition(
                TransitionBuilder::new()
                    .from(PetState::FoodSelectionGrumpy)
                    .on(EventKind::PlayerSelecting)
                    .to(PetState::RecoveredStatus)
                    .actions(EAT),
            )?
            .add_transition(simple_transition(
                PetState::FoodSelectionGrumpy,
                EventKind::CancelFeed,
                PetState::MoodGrumpy,
            ))
            // paused
            .add_transition(simple_transition(
                PetState::Paused,
                EventKind::TogglePause,
                PetState::HealthyNormal,
            ))
            .transition(
                TransitionBuilder::new()
                    .from(PetState::Paused)
                    .on(EventKind::RestartGame)
                    .to(PetState::HealthyNormal)
                    .action(Action::RequestRestart),
            )?
            .transitions(pause_transitions())
            .build()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// First row for `state` and `trigger` whose guard passes.
    pub fn select(&self, state: PetState, trigger: &Trigger, ctx: &PetContext) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.can_execute(state, trigger, ctx))
    }

    /// Delay of the timer armed on entering `state`, if it has one.
    pub fn timer_delay(&self, state: PetState) -> Option<Duration> {
        self.transitions
            .iter()
            .filter(|t| t.from == state)
            .find_map(|t| match t.trigger {
                Trigger::After(delay) => Some(delay),
                _ => None,
            })
    }

    /// Whether `state` has immediate transitions to resolve on entry.
    pub fn resolves_immediately(&self, state: PetState) -> bool {
        self.transitions
            .iter()
            .any(|t| t.from == state && t.trigger == Trigger::Always)
    }
}
