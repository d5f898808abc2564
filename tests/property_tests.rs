//! Property-based tests for the pet machine.
//!
//! These tests use proptest to drive the machine with random sequences
//! of events and timer expiries and check the invariants that must hold
//! after every step.

use chimera::core::State;
use chimera::machine::{PetMachine, StepResult, TransitionTable, DEFAULT_STATE_TIMEOUT};
use chimera::pet::{guards, FixedFunFact, Food, Mood, PetContext, PetEvent, PetState, STAT_MAX};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Clone, Debug)]
enum Step {
    Event(PetEvent),
    Timer,
}

fn machine() -> PetMachine {
    let table = TransitionTable::standard(DEFAULT_STATE_TIMEOUT).unwrap();
    PetMachine::new(Arc::new(table), Arc::new(FixedFunFact("fact".to_string())))
}

fn apply(m: &mut PetMachine, step: &Step) -> StepResult {
    match step {
        Step::Event(event) => m.send(event),
        Step::Timer => m.fire_timer(),
    }
}

prop_compose! {
    fn arbitrary_food()(variant in 0..3usize) -> Food {
        Food::ALL[variant]
    }
}

fn arbitrary_event() -> impl Strategy<Value = PetEvent> {
    prop_oneof![
        1 => Just(PetEvent::Play),
        1 => Just(PetEvent::Feed),
        1 => Just(PetEvent::MakesSleep),
        3 => Just(PetEvent::TimeCheck),
        2 => arbitrary_food().prop_map(PetEvent::player_selecting),
        1 => Just(PetEvent::RepeatSameFood3Times),
        1 => Just(PetEvent::TogglePause),
        1 => Just(PetEvent::RestartGame),
        1 => Just(PetEvent::CancelFeed),
    ]
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => arbitrary_event().prop_map(Step::Event),
        1 => Just(Step::Timer),
    ]
}

prop_compose! {
    fn arbitrary_context()(
        energy in 0..=STAT_MAX,
        hunger in 0..=STAT_MAX,
        mood in prop_oneof![Just(Mood::Normal), Just(Mood::Happy), Just(Mood::Grumpy)],
    ) -> PetContext {
        PetContext {
            mood,
            energy,
            hunger,
            ..PetContext::default()
        }
    }
}

proptest! {
    #[test]
    fn stats_stay_in_range(steps in prop::collection::vec(arbitrary_step(), 0..80)) {
        let mut m = machine();
        for step in &steps {
            apply(&mut m, step);
            prop_assert!(m.context().energy <= STAT_MAX);
            prop_assert!(m.context().hunger <= STAT_MAX);
        }
    }

    #[test]
    fn recovered_status_is_never_settled(steps in prop::collection::vec(arbitrary_step(), 0..80)) {
        let mut m = machine();
        for step in &steps {
            let result = apply(&mut m, step);
            prop_assert_ne!(m.current_state(), PetState::RecoveredStatus);
            if let StepResult::Transitioned { to, .. } = result {
                prop_assert!(!to.is_transient());
            }
        }
    }

    #[test]
    fn terminal_state_freezes_everything(steps in prop::collection::vec(arbitrary_step(), 0..120)) {
        let mut m = machine();
        let mut frozen: Option<PetContext> = None;
        for step in &steps {
            let result = apply(&mut m, step);
            if let Some(ctx) = &frozen {
                prop_assert_eq!(result, StepResult::Halted);
                prop_assert_eq!(m.current_state(), PetState::SickGrumpy);
                prop_assert_eq!(m.context(), ctx);
            } else if m.is_final() {
                frozen = Some(m.context().clone());
            }
        }
    }

    #[test]
    fn ignored_steps_change_nothing(steps in prop::collection::vec(arbitrary_step(), 0..80)) {
        let mut m = machine();
        for step in &steps {
            let before_state = m.current_state();
            let before_ctx = m.context().clone();
            let result = apply(&mut m, step);
            if matches!(result, StepResult::Ignored | StepResult::Halted) {
                prop_assert_eq!(m.current_state(), before_state);
                prop_assert_eq!(m.context(), &before_ctx);
            }
            if result == StepResult::Updated {
                prop_assert_eq!(m.current_state(), before_state);
            }
        }
    }

    #[test]
    fn food_streak_tracks_last_food(steps in prop::collection::vec(arbitrary_step(), 0..80)) {
        let mut m = machine();
        for step in &steps {
            apply(&mut m, step);
            let ctx = m.context();
            match ctx.last_food {
                None => prop_assert_eq!(ctx.consecutive_same_food_count, 0),
                Some(_) => prop_assert!(ctx.consecutive_same_food_count >= 1),
            }
        }
    }

    #[test]
    fn history_forms_a_chain(steps in prop::collection::vec(arbitrary_step(), 0..80)) {
        let mut m = machine();
        for step in &steps {
            apply(&mut m, step);
        }
        let transitions = m.history().transitions();
        for pair in transitions.windows(2) {
            prop_assert_eq!(pair[0].to, pair[1].from);
        }
        if let Some(last) = transitions.last() {
            prop_assert_eq!(last.to, m.current_state());
        }
    }

    #[test]
    fn guards_are_deterministic(ctx in arbitrary_context()) {
        for guard in [
            guards::play_guard(),
            guards::grumpy_guard(),
            guards::sick_guard(),
            guards::healthy_guard(),
        ] {
            prop_assert_eq!(guard.check(&ctx), guard.check(&ctx));
        }
    }

    #[test]
    fn recovery_guards_partition_contexts(ctx in arbitrary_context()) {
        prop_assert_ne!(guards::is_healthy(&ctx), guards::unhealthy_for_grumpy(&ctx));
    }

    #[test]
    fn sick_implies_grumpy_threshold(ctx in arbitrary_context()) {
        if guards::unhealthy_for_sick(&ctx) {
            prop_assert!(guards::unhealthy_for_grumpy(&ctx));
        }
    }

    #[test]
    fn state_names_parse_back(index in 0..PetState::ALL.len()) {
        let state = PetState::ALL[index];
        prop_assert_eq!(PetState::from_name(state.name()), Some(state));
    }
}
