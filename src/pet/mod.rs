//! The virtual-pet domain: states, context, events, guards.

mod context;
mod event;
mod fun_facts;
pub mod guards;
mod states;

pub use context::{adjust_stat, Mood, PetContext, STAT_MAX, STAT_MIN};
pub use event::{EventError, EventKind, Food, PetEvent};
pub use fun_facts::{FixedFunFact, FunFactSource, RandomFunFacts, FUN_FACTS};
pub use states::PetState;
