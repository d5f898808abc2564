//! Read-only view handed to observers after each transition.

use crate::core::State;
use crate::pet::{guards, PetContext, PetState};
use serde::{Deserialize, Serialize};

/// How pressing the pet's hunger is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HungerLevel {
    Normal,
    Warning,
    Critical,
}

/// State and context as observed after a processed event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: PetState,
    pub context: PetContext,
}

impl Snapshot {
    pub fn state_name(&self) -> &str {
        self.state.name()
    }

    pub fn is_final(&self) -> bool {
        self.state.is_final()
    }

    /// Whether a `play` request would currently be accepted.
    pub fn can_play(&self) -> bool {
        matches!(self.state, PetState::HealthyNormal | PetState::MoodGrumpy)
            && guards::sufficient_energy_for_play(&self.context)
    }

    pub fn hunger_level(&self) -> HungerLevel {
        match self.context.hunger {
            h if h >= 8 => HungerLevel::Critical,
            h if h >= 5 => HungerLevel::Warning,
            _ => HungerLevel::Normal,
        }
    }
}
