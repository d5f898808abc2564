//! State transition history tracking.
//!
//! Provides immutable tracking of state machine transitions over time.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state transition.
///
/// Transitions are immutable values describing a move from one state to
/// another, the trigger that caused it, and when it happened.
///
/// # Example
///
/// ```rust
/// use chimera::core::StateTransition;
/// use chimera::pet::PetState;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: PetState::HealthyNormal,
///     to: PetState::Playing,
///     trigger: "play".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.trigger, "play");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Name of the event, timer or redirect that caused the move
    pub trigger: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// History is immutable: `record` returns a new history with the
/// transition added. An optional limit keeps only the most recent
/// transitions.
///
/// # Example
///
/// ```rust
/// use chimera::core::{StateHistory, StateTransition};
/// use chimera::pet::PetState;
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: PetState::HealthyNormal,
///         to: PetState::FoodSelection,
///         trigger: "feed".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: PetState::FoodSelection,
///         to: PetState::StomachFull,
///         trigger: "player_selecting".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[2], &PetState::StomachFull);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
    limit: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history that retains at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched. When a limit is set the
    /// oldest transitions are dropped first.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        if let Some(limit) = self.limit {
            let excess = transitions.len().saturating_sub(limit);
            transitions.drain(..excess);
        }
        Self {
            transitions,
            limit: self.limit,
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition, then
    /// the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last retained transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// Get all retained transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "initial",
                Self::Processing => "processing",
                Self::Complete => "complete",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Complete)
        }
    }

    fn hop(from: TestState, to: TestState) -> StateTransition<TestState> {
        StateTransition {
            from,
            to,
            trigger: "step".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert_eq!(history.transitions().len(), 0);
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(hop(TestState::Initial, TestState::Processing));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(hop(TestState::Initial, TestState::Processing))
            .record(hop(TestState::Processing, TestState::Complete));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Initial);
        assert_eq!(path[1], &TestState::Processing);
        assert_eq!(path[2], &TestState::Complete);
    }

    #[test]
    fn limit_drops_oldest_transitions() {
        let history = StateHistory::with_limit(2)
            .record(hop(TestState::Initial, TestState::Processing))
            .record(hop(TestState::Processing, TestState::Initial))
            .record(hop(TestState::Initial, TestState::Complete));

        assert_eq!(history.transitions().len(), 2);
        let path = history.get_path();
        assert_eq!(path[0], &TestState::Processing);
        assert_eq!(history.last().unwrap().to, TestState::Complete);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let history = StateHistory::new()
            .record(StateTransition {
                from: TestState::Initial,
                to: TestState::Processing,
                trigger: "step".to_string(),
                timestamp: start,
            })
            .record(StateTransition {
                from: TestState::Processing,
                to: TestState::Complete,
                trigger: "step".to_string(),
                timestamp: start + chrono::Duration::milliseconds(10),
            });

        assert_eq!(history.duration(), Some(Duration::from_millis(10)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(hop(TestState::Initial, TestState::Processing));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(
            history.transitions().len(),
            deserialized.transitions().len()
        );
    }
}
