//! Chimera: a virtual-pet state machine.
//!
//! The pet's behavior is a data-driven transition table evaluated by a
//! pure, synchronous core. Timers, the periodic hunger tick and events
//! the pet raises about itself live in an async shell that feeds the
//! core one event at a time.
//!
//! # Layers
//!
//! - [`core`]: generic vocabulary: the [`State`](core::State) trait, named
//!   guards and immutable transition history
//! - [`builder`]: fluent builders for transition tables
//! - [`pet`]: the domain: states, context, events and guard predicates
//! - [`machine`]: the standard transition table and its evaluator
//! - [`runtime`]: engines, routers, timers and restartable sessions
//!
//! # Example
//!
//! Driving the machine directly, without timers:
//!
//! ```rust
//! use chimera::machine::{PetMachine, StepResult, TransitionTable, DEFAULT_STATE_TIMEOUT};
//! use chimera::pet::{Food, FixedFunFact, PetEvent, PetState};
//! use std::sync::Arc;
//!
//! let table = TransitionTable::standard(DEFAULT_STATE_TIMEOUT).unwrap();
//! let mut pet = PetMachine::new(Arc::new(table), Arc::new(FixedFunFact("hi".into())));
//!
//! pet.send(&PetEvent::Feed);
//! pet.send(&PetEvent::player_selecting(Food::Cookie));
//! assert_eq!(pet.current_state(), PetState::StomachFull);
//!
//! // The stomach_full timer has expired.
//! assert!(matches!(pet.fire_timer(), StepResult::Transitioned { .. }));
//! assert_eq!(pet.current_state(), PetState::HealthyNormal);
//! ```
//!
//! Running a live engine:
//!
//! ```rust,no_run
//! use chimera::config::EngineConfig;
//! use chimera::pet::PetEvent;
//! use chimera::runtime::Engine;
//!
//! # async fn run() -> Result<(), chimera::runtime::EngineError> {
//! let engine = Engine::start(&EngineConfig::default())?;
//! engine.subscribe(|snapshot| println!("{} {:?}", snapshot.state, snapshot.hunger_level()));
//! engine.send(PetEvent::Play);
//! engine.shutdown().await
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod logging;
pub mod machine;
pub mod pet;
pub mod runtime;

pub use crate::core::{Guard, State, StateHistory, StateTransition};
pub use config::{ConfigError, EngineConfig};
pub use machine::{PetMachine, Snapshot, StepResult};
pub use pet::{PetContext, PetEvent, PetState};
pub use runtime::{Engine, EngineError, EngineHandle, Session};
