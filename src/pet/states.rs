//! States of the pet machine.

use crate::state_enum;

state_enum! {
    /// The active node of the pet machine.
    #[derive(Default)]
    pub enum PetState {
        /// Idle with a normal mood. Initial state.
        #[default]
        HealthyNormal => "healthy_normal",
        /// Playing for a short while; periodic checks are ignored.
        Playing => "playing",
        /// Choosing a food while healthy.
        FoodSelection => "food_selection",
        /// Resting after being put to sleep.
        EnoughSleep => "enough_sleep",
        MoodGrumpy => "mood_grumpy",
        StomachFull => "stomach_full",
        /// Sick and unhappy. The game is over.
        SickGrumpy => "sick_grumpy",
        /// Computed redirect to `healthy_normal` or `mood_grumpy`.
        RecoveredStatus => "recovered_status",
        /// Choosing a food while grumpy.
        FoodSelectionGrumpy => "food_selection_grumpy",
        Paused => "paused",
    }
    final: [SickGrumpy]
    transient: [RecoveredStatus]
}

impl PetState {
    /// Whether the pause side-path is reachable from here.
    pub fn can_pause(&self) -> bool {
        !matches!(self, PetState::Paused | PetState::SickGrumpy)
    }

    /// Whether periodic `time_check` ticks should be running.
    pub fn ticks(&self) -> bool {
        self.can_pause()
    }
}
