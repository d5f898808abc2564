//! Events the pet machine understands.
//!
//! Events are immutable values. Constructors validate their payload so a
//! malformed intent never reaches the router.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors raised while constructing an event from untyped input.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Unknown event type '{0}'")]
    UnknownType(String),

    #[error("Event '{0}' requires a food identifier")]
    MissingFood(&'static str),

    #[error("Event '{0}' does not carry a payload")]
    UnexpectedPayload(&'static str),

    #[error("Unknown food '{0}'. Valid options: cookie, milk, honeycake")]
    UnknownFood(String),

    #[error("Malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Food the player can pick from the feeding carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Food {
    Cookie,
    Milk,
    Honeycake,
}

impl Food {
    pub const ALL: [Food; 3] = [Food::Cookie, Food::Milk, Food::Honeycake];

    pub fn as_str(&self) -> &'static str {
        match self {
            Food::Cookie => "cookie",
            Food::Milk => "milk",
            Food::Honeycake => "honeycake",
        }
    }
}

impl FromStr for Food {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Food::ALL
            .into_iter()
            .find(|food| food.as_str() == s)
            .ok_or_else(|| EventError::UnknownFood(s.to_string()))
    }
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload-free discriminant of [`PetEvent`], used as a transition trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Play,
    Feed,
    MakesSleep,
    TimeCheck,
    PlayerSelecting,
    RepeatSameFood3Times,
    TogglePause,
    RestartGame,
    CancelFeed,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::Play,
        EventKind::Feed,
        EventKind::MakesSleep,
        EventKind::TimeCheck,
        EventKind::PlayerSelecting,
        EventKind::RepeatSameFood3Times,
        EventKind::TogglePause,
        EventKind::RestartGame,
        EventKind::CancelFeed,
    ];

    /// Wire name of the event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Play => "play",
            EventKind::Feed => "feed",
            EventKind::MakesSleep => "makes_sleep",
            EventKind::TimeCheck => "time_check",
            EventKind::PlayerSelecting => "player_selecting",
            EventKind::RepeatSameFood3Times => "repeat_same_food_3_times",
            EventKind::TogglePause => "TOGGLE_PAUSE",
            EventKind::RestartGame => "RESTART_GAME",
            EventKind::CancelFeed => "CANCEL_FEED",
        }
    }
}

impl FromStr for EventKind {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EventError::UnknownType(s.to_string()))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An intent delivered to the pet machine.
///
/// Serializes to the tagged-object shape `{"type": "...", ...}`.
///
/// ```
/// use chimera::pet::{Food, PetEvent};
///
/// let event = PetEvent::from_json(r#"{"type":"player_selecting","food":"milk"}"#).unwrap();
/// assert_eq!(event, PetEvent::PlayerSelecting { food: Food::Milk });
///
/// assert!(PetEvent::from_json(r#"{"type":"player_selecting"}"#).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PetEvent {
    #[serde(rename = "play")]
    Play,
    #[serde(rename = "feed")]
    Feed,
    #[serde(rename = "makes_sleep")]
    MakesSleep,
    #[serde(rename = "time_check")]
    TimeCheck,
    #[serde(rename = "player_selecting")]
    PlayerSelecting { food: Food },
    #[serde(rename = "repeat_same_food_3_times")]
    RepeatSameFood3Times,
    #[serde(rename = "TOGGLE_PAUSE")]
    TogglePause,
    #[serde(rename = "RESTART_GAME")]
    RestartGame,
    #[serde(rename = "CANCEL_FEED")]
    CancelFeed,
}

impl PetEvent {
    /// Build an event from an event type and an optional food payload.
    ///
    /// `player_selecting` must carry a known food; every other type must
    /// carry none.
    pub fn parse(kind: &str, food: Option<&str>) -> Result<Self, EventError> {
        let kind: EventKind = kind.parse()?;
        match (kind, food) {
            (EventKind::PlayerSelecting, Some(food)) => Ok(PetEvent::PlayerSelecting {
                food: food.parse()?,
            }),
            (_, Some(_)) => Err(EventError::UnexpectedPayload(kind.as_str())),
            (_, None) => Self::unit(kind).ok_or(EventError::MissingFood(kind.as_str())),
        }
    }

    /// Parse the tagged JSON form.
    pub fn from_json(input: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn player_selecting(food: Food) -> Self {
        PetEvent::PlayerSelecting { food }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            PetEvent::Play => EventKind::Play,
            PetEvent::Feed => EventKind::Feed,
            PetEvent::MakesSleep => EventKind::MakesSleep,
            PetEvent::TimeCheck => EventKind::TimeCheck,
            PetEvent::PlayerSelecting { .. } => EventKind::PlayerSelecting,
            PetEvent::RepeatSameFood3Times => EventKind::RepeatSameFood3Times,
            PetEvent::TogglePause => EventKind::TogglePause,
            PetEvent::RestartGame => EventKind::RestartGame,
            PetEvent::CancelFeed => EventKind::CancelFeed,
        }
    }

    /// The food carried by `player_selecting`.
    pub fn food(&self) -> Option<Food> {
        match self {
            PetEvent::PlayerSelecting { food } => Some(*food),
            _ => None,
        }
    }

    fn unit(kind: EventKind) -> Option<Self> {
        let event = match kind {
            EventKind::Play => PetEvent::Play,
            EventKind::Feed => PetEvent::Feed,
            EventKind::MakesSleep => PetEvent::MakesSleep,
            EventKind::TimeCheck => PetEvent::TimeCheck,
            EventKind::RepeatSameFood3Times => PetEvent::RepeatSameFood3Times,
            EventKind::TogglePause => PetEvent::TogglePause,
            EventKind::RestartGame => PetEvent::RestartGame,
            EventKind::CancelFeed => PetEvent::CancelFeed,
            EventKind::PlayerSelecting => return None,
        };
        Some(event)
    }
}

impl fmt::Display for PetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PetEvent::PlayerSelecting { food } => write!(f, "player_selecting({})", food),
            other => f.write_str(other.kind().as_str()),
        }
    }
}
