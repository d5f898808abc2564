//! Events the engine raises in reaction to its own snapshots.
//!
//! Derivation runs as an ordinary subscriber and re-enters through the
//! router, so a derived event is queued behind whatever is already
//! waiting and is never evaluated inside the transition that caused it.

use crate::machine::Snapshot;
use crate::pet::{PetEvent, PetState};
use crate::runtime::router::{Router, Subscriber};
use std::sync::Arc;
use tracing::debug;

/// Same-food streak above which a full stomach turns grumpy.
pub const SAME_FOOD_LIMIT: u32 = 3;

/// The event to inject in response to `snapshot`, if any.
pub fn derived_event(snapshot: &Snapshot) -> Option<PetEvent> {
    let overfed = snapshot.state == PetState::StomachFull
        && snapshot.context.consecutive_same_food_count > SAME_FOOD_LIMIT;
    overfed.then_some(PetEvent::RepeatSameFood3Times)
}

/// Subscriber feeding [`derived_event`] back into `router`.
pub(crate) fn observer(router: Router) -> Subscriber {
    Arc::new(move |snapshot: &Snapshot| {
        if let Some(event) = derived_event(snapshot) {
            debug!(%event, state = %snapshot.state, "deriving event");
            router.send(event);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::{Food, PetContext};
    use crate::runtime::router::Input;

    fn snapshot(state: PetState, count: u32) -> Snapshot {
        Snapshot {
            state,
            context: PetContext {
                last_food: Some(Food::Cookie),
                consecutive_same_food_count: count,
                ..PetContext::default()
            },
        }
    }

    #[test]
    fn fourth_same_food_in_stomach_full_derives() {
        assert_eq!(derived_event(&snapshot(PetState::StomachFull, 3)), None);
        assert_eq!(
            derived_event(&snapshot(PetState::StomachFull, 4)),
            Some(PetEvent::RepeatSameFood3Times)
        );
    }

    #[test]
    fn other_states_never_derive() {
        for state in PetState::ALL.iter().filter(|s| **s != PetState::StomachFull) {
            assert_eq!(derived_event(&snapshot(*state, 9)), None);
        }
    }

    #[test]
    fn observer_queues_through_router() {
        let (router, mut rx) = Router::channel();
        let observe = observer(router);

        observe(&snapshot(PetState::HealthyNormal, 5));
        assert!(rx.try_recv().is_err());

        observe(&snapshot(PetState::StomachFull, 5));
        assert!(matches!(
            rx.try_recv(),
            Ok(Input::Event(PetEvent::RepeatSameFood3Times))
        ));
    }
}
