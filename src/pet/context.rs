//! The pet's mutable well-being record.

use super::event::Food;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest value a stat can take.
pub const STAT_MIN: u8 = 0;
/// Highest value a stat can take.
pub const STAT_MAX: u8 = 10;

/// Apply a signed change to a stat, clamping the result to
/// `[STAT_MIN, STAT_MAX]`.
///
/// ```
/// use chimera::pet::adjust_stat;
///
/// assert_eq!(adjust_stat(9, 3), 10);
/// assert_eq!(adjust_stat(1, -3), 0);
/// assert_eq!(adjust_stat(5, 2), 7);
/// ```
pub fn adjust_stat(current: u8, change: i8) -> u8 {
    let next = i16::from(current) + i16::from(change);
    next.clamp(i16::from(STAT_MIN), i16::from(STAT_MAX)) as u8
}

/// Advisory mood label shown alongside the state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Normal,
    Happy,
    Grumpy,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Normal => write!(f, "normal"),
            Mood::Happy => write!(f, "happy"),
            Mood::Grumpy => write!(f, "grumpy"),
        }
    }
}

/// Context carried alongside the current state.
///
/// Owned by the machine and replaced wholesale on every transition;
/// observers only ever see clones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetContext {
    pub mood: Mood,
    pub energy: u8,
    pub hunger: u8,
    pub last_food: Option<Food>,
    /// Zero until the first food is chosen, then at least one.
    pub consecutive_same_food_count: u32,
    pub current_fun_fact: String,
}

impl Default for PetContext {
    fn default() -> Self {
        Self {
            mood: Mood::Normal,
            energy: STAT_MAX,
            hunger: STAT_MIN,
            last_food: None,
            consecutive_same_food_count: 0,
            current_fun_fact: String::new(),
        }
    }
}

impl PetContext {
    /// Record a food choice: the streak grows when the same food is picked
    /// again and restarts at one otherwise.
    pub fn track_food(&mut self, food: Food) {
        self.consecutive_same_food_count = if self.last_food == Some(food) {
            self.consecutive_same_food_count.saturating_add(1)
        } else {
            1
        };
        self.last_food = Some(food);
    }
}
