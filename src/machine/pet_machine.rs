//! Synchronous evaluation of the transition table.

use crate::core::{State, StateHistory, StateTransition};
use crate::machine::snapshot::Snapshot;
use crate::machine::table::TransitionTable;
use crate::machine::transition::{Target, Trigger};
use crate::pet::{FunFactSource, PetContext, PetEvent, PetState};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of delivering one trigger to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// A targeted row fired and the machine settled in `to`, after any
    /// immediate redirects.
    Transitioned { from: PetState, to: PetState },

    /// A targetless row fired: the context changed, the state did not.
    Updated,

    /// No row matched; state and context are unchanged.
    Ignored,

    /// The machine is in its terminal state and accepts nothing.
    Halted,
}

impl StepResult {
    /// Whether the step produced a new snapshot worth reporting.
    pub fn is_processed(&self) -> bool {
        matches!(self, StepResult::Transitioned { .. } | StepResult::Updated)
    }
}

/// The pet machine: current state, context and history.
///
/// Evaluation is synchronous and never re-entered; timers and derived
/// events are the caller's business.
pub struct PetMachine {
    current: PetState,
    context: PetContext,
    table: Arc<TransitionTable>,
    facts: Arc<dyn FunFactSource>,
    history: StateHistory<PetState>,
}

impl PetMachine {
    /// Create a machine in the initial state with the default context.
    pub fn new(table: Arc<TransitionTable>, facts: Arc<dyn FunFactSource>) -> Self {
        Self {
            current: PetState::default(),
            context: PetContext::default(),
            table,
            facts,
            history: StateHistory::new(),
        }
    }

    /// Keep at most `limit` transitions of history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = StateHistory::with_limit(limit);
        self
    }

    pub fn current_state(&self) -> PetState {
        self.current
    }

    pub fn context(&self) -> &PetContext {
        &self.context
    }

    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    pub fn history(&self) -> &StateHistory<PetState> {
        &self.history
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.current,
            context: self.context.clone(),
        }
    }

    /// Delay of the entry timer of the current state.
    pub fn pending_timer(&self) -> Option<Duration> {
        self.table.timer_delay(self.current)
    }

    /// Deliver an event.
    pub fn send(&mut self, event: &PetEvent) -> StepResult {
        self.step(Trigger::Event(event.kind()), Some(event))
    }

    /// Deliver the expiry of the current state's entry timer.
    pub fn fire_timer(&mut self) -> StepResult {
        self.step(Trigger::After(Duration::ZERO), None)
    }

    fn step(&mut self, trigger: Trigger, event: Option<&PetEvent>) -> StepResult {
        if self.current.is_final() {
            debug!(state = %self.current, %trigger, "terminal state, ignoring");
            return StepResult::Halted;
        }

        let table = Arc::clone(&self.table);
        let Some(row) = table.select(self.current, &trigger, &self.context) else {
            debug!(state = %self.current, %trigger, "no transition, ignoring");
            return StepResult::Ignored;
        };

        let from = self.current;
        self.context = row.apply(&self.context, event, self.facts.as_ref());

        match row.target {
            Target::Stay => {
                debug!(state = %from, %trigger, "context updated in place");
                StepResult::Updated
            }
            Target::State(to) => {
                self.enter(to, row.trigger.to_string());
                self.resolve_immediate();
                debug!(%from, to = %self.current, %trigger, "transitioned");
                StepResult::Transitioned {
                    from,
                    to: self.current,
                }
            }
        }
    }

    fn enter(&mut self, to: PetState, trigger: String) {
        self.history = self.history.record(StateTransition {
            from: self.current,
            to,
            trigger,
            timestamp: Utc::now(),
        });
        self.current = to;
    }

    // Transient states are left within the same step; the hop limit only
    // guards against a malformed table looping between them.
    fn resolve_immediate(&mut self) {
        let table = Arc::clone(&self.table);
        for _ in 0..PetState::ALL.len() {
            if !table.resolves_immediately(self.current) {
                return;
            }
            let Some(row) = table.select(self.current, &Trigger::Always, &self.context) else {
                warn!(state = %self.current, "no immediate transition matched");
                return;
            };
            self.context = row.apply(&self.context, None, self.facts.as_ref());
            let to = row.resolve_target();
            self.enter(to, row.trigger.to_string());
        }
        warn!(state = %self.current, "immediate transitions did not settle");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::table::DEFAULT_STATE_TIMEOUT;
    use crate::pet::{FixedFunFact, Food, Mood};

    fn machine() -> PetMachine {
        let table = TransitionTable::standard(DEFAULT_STATE_TIMEOUT).unwrap();
        PetMachine::new(
            Arc::new(table),
            Arc::new(FixedFunFact("The garden is so nice...".to_string())),
        )
    }

    fn machine_at(state: PetState, energy: u8, hunger: u8) -> PetMachine {
        let mut m = machine();
        m.current = state;
        m.context.energy = energy;
        m.context.hunger = hunger;
        m
    }

    #[test]
    fn starts_healthy_with_default_context() {
        let m = machine();
        assert_eq!(m.current_state(), PetState::HealthyNormal);
        assert_eq!(m.context(), &PetContext::default());
        assert!(m.history().transitions().is_empty());
    }

    #[test]
    fn play_with_energy_enters_playing() {
        let mut m = machine();

        let result = m.send(&PetEvent::Play);

        assert_eq!(
            result,
            StepResult::Transitioned {
                from: PetState::HealthyNormal,
                to: PetState::Playing
            }
        );
        assert_eq!(m.context().energy, 7);
        assert_eq!(m.context().mood, Mood::Happy);
        assert_eq!(m.context().current_fun_fact, "The garden is so nice...");
        assert_eq!(m.pending_timer(), Some(DEFAULT_STATE_TIMEOUT));
    }

    #[test]
    fn play_without_energy_is_blocked() {
        let mut m = machine_at(PetState::HealthyNormal, 5, 0);
        let before = m.context().clone();

        assert_eq!(m.send(&PetEvent::Play), StepResult::Ignored);
        assert_eq!(m.current_state(), PetState::HealthyNormal);
        assert_eq!(m.context(), &before);
    }

    #[test]
    fn time_checks_make_the_pet_grumpy_once_hungry() {
        let mut m = machine();

        for _ in 0..4 {
            assert_eq!(m.send(&PetEvent::TimeCheck), StepResult::Updated);
            assert_eq!(m.current_state(), PetState::HealthyNormal);
        }
        assert_eq!(m.context().hunger, 4);
        assert_eq!(m.context().energy, 6);

        // hunger is 5 when checked: the guard reads the context before
        // the actions run.
        m.send(&PetEvent::TimeCheck);
        assert_eq!(m.current_state(), PetState::HealthyNormal);
        assert_eq!(m.context().hunger, 5);

        let result = m.send(&PetEvent::TimeCheck);
        assert_eq!(
            result,
            StepResult::Transitioned {
                from: PetState::HealthyNormal,
                to: PetState::MoodGrumpy
            }
        );
        assert_eq!(m.context().hunger, 6);
        assert_eq!(m.context().energy, 4);
        assert_eq!(m.context().mood, Mood::Grumpy);
    }

    #[test]
    fn grumpy_pet_gets_sick_then_halts() {
        let mut m = machine_at(PetState::MoodGrumpy, 6, 6);

        assert_eq!(m.send(&PetEvent::TimeCheck), StepResult::Updated);
        assert_eq!(m.context().hunger, 7);
        assert_eq!(m.send(&PetEvent::TimeCheck), StepResult::Updated);
        assert_eq!(m.context().hunger, 8);

        let result = m.send(&PetEvent::TimeCheck);
        assert_eq!(
            result,
            StepResult::Transitioned {
                from: PetState::MoodGrumpy,
                to: PetState::SickGrumpy
            }
        );
        assert!(m.is_final());

        let frozen = m.context().clone();
        for event in [
            PetEvent::Play,
            PetEvent::Feed,
            PetEvent::TimeCheck,
            PetEvent::TogglePause,
            PetEvent::RestartGame,
        ] {
            assert_eq!(m.send(&event), StepResult::Halted);
        }
        assert_eq!(m.fire_timer(), StepResult::Halted);
        assert_eq!(m.context(), &frozen);
        assert_eq!(m.current_state(), PetState::SickGrumpy);
    }

    #[test]
    fn feeding_tracks_food_and_fills_stomach() {
        let mut m = machine_at(PetState::HealthyNormal, 10, 6);

        m.send(&PetEvent::Feed);
        assert_eq!(m.current_state(), PetState::FoodSelection);

        m.send(&PetEvent::player_selecting(Food::Milk));
        assert_eq!(m.current_state(), PetState::StomachFull);
        assert_eq!(m.context().hunger, 3);
        assert_eq!(m.context().last_food, Some(Food::Milk));
        assert_eq!(m.context().consecutive_same_food_count, 1);

        assert_eq!(
            m.fire_timer(),
            StepResult::Transitioned {
                from: PetState::StomachFull,
                to: PetState::HealthyNormal
            }
        );
    }

    #[test]
    fn cancel_feed_returns_to_origin() {
        let mut m = machine();
        m.send(&PetEvent::Feed);
        m.send(&PetEvent::CancelFeed);
        assert_eq!(m.current_state(), PetState::HealthyNormal);

        let mut m = machine_at(PetState::MoodGrumpy, 4, 6);
        m.send(&PetEvent::Feed);
        assert_eq!(m.current_state(), PetState::FoodSelectionGrumpy);
        m.send(&PetEvent::CancelFeed);
        assert_eq!(m.current_state(), PetState::MoodGrumpy);
    }

    #[test]
    fn grumpy_feeding_redirects_through_recovered_status() {
        let mut m = machine_at(PetState::MoodGrumpy, 8, 6);
        m.send(&PetEvent::Feed);

        let result = m.send(&PetEvent::player_selecting(Food::Cookie));

        // hunger 6 - 3 = 3 and energy 8: healthy.
        assert_eq!(
            result,
            StepResult::Transitioned {
                from: PetState::FoodSelectionGrumpy,
                to: PetState::HealthyNormal
            }
        );
        let path: Vec<_> = m.history().get_path().into_iter().copied().collect();
        assert_eq!(
            path,
            vec![
                PetState::MoodGrumpy,
                PetState::FoodSelectionGrumpy,
                PetState::RecoveredStatus,
                PetState::HealthyNormal
            ]
        );
        assert_eq!(m.history().last().unwrap().trigger, "always");
    }

    #[test]
    fn sleeping_while_grumpy_recovers_only_when_healthy() {
        let mut m = machine_at(PetState::MoodGrumpy, 4, 6);
        m.send(&PetEvent::MakesSleep);
        assert_eq!(m.current_state(), PetState::MoodGrumpy);
        assert_eq!(m.context().energy, 7);

        let mut m = machine_at(PetState::MoodGrumpy, 2, 2);
        m.send(&PetEvent::MakesSleep);
        assert_eq!(m.current_state(), PetState::MoodGrumpy);
        assert_eq!(m.context().energy, 5);
        m.send(&PetEvent::MakesSleep);
        assert_eq!(m.current_state(), PetState::HealthyNormal);
        assert_eq!(m.context().energy, 8);
    }

    #[test]
    fn playing_ends_through_recovered_status() {
        let mut m = machine_at(PetState::HealthyNormal, 8, 4);
        m.send(&PetEvent::Play);
        assert_eq!(m.context().energy, 5);

        assert_eq!(m.send(&PetEvent::TimeCheck), StepResult::Ignored);

        assert_eq!(
            m.fire_timer(),
            StepResult::Transitioned {
                from: PetState::Playing,
                to: PetState::MoodGrumpy
            }
        );
    }

    #[test]
    fn sleep_is_timed_and_restores_energy() {
        let mut m = machine_at(PetState::HealthyNormal, 9, 0);
        m.send(&PetEvent::MakesSleep);
        assert_eq!(m.current_state(), PetState::EnoughSleep);
        assert_eq!(m.context().energy, 10);

        m.fire_timer();
        assert_eq!(m.current_state(), PetState::HealthyNormal);
    }

    #[test]
    fn repeated_food_event_overfeeds() {
        let mut m = machine_at(PetState::StomachFull, 6, 3);

        m.send(&PetEvent::RepeatSameFood3Times);

        assert_eq!(m.current_state(), PetState::MoodGrumpy);
        assert_eq!(m.context().hunger, 8);
        assert_eq!(m.context().energy, 1);
        assert_eq!(m.context().mood, Mood::Grumpy);
    }

    #[test]
    fn pause_and_resume() {
        let mut m = machine();
        m.send(&PetEvent::Feed);
        m.send(&PetEvent::TogglePause);
        assert_eq!(m.current_state(), PetState::Paused);
        assert_eq!(m.pending_timer(), None);

        assert_eq!(m.send(&PetEvent::TimeCheck), StepResult::Ignored);

        m.send(&PetEvent::TogglePause);
        assert_eq!(m.current_state(), PetState::HealthyNormal);
    }

    #[test]
    fn restart_from_pause_lands_healthy() {
        let mut m = machine_at(PetState::MoodGrumpy, 4, 6);
        m.send(&PetEvent::TogglePause);
        m.send(&PetEvent::RestartGame);
        assert_eq!(m.current_state(), PetState::HealthyNormal);
    }

    #[test]
    fn timer_outside_timed_state_is_ignored() {
        let mut m = machine();
        assert_eq!(m.fire_timer(), StepResult::Ignored);
    }

    #[test]
    fn history_limit_is_respected() {
        let table = TransitionTable::standard(DEFAULT_STATE_TIMEOUT).unwrap();
        let mut m = PetMachine::new(Arc::new(table), Arc::new(FixedFunFact(String::new())))
            .with_history_limit(2);

        for _ in 0..3 {
            m.send(&PetEvent::Feed);
            m.send(&PetEvent::CancelFeed);
        }
        assert_eq!(m.history().transitions().len(), 2);
    }
}
