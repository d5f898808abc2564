//! The async shell around the pet machine.
//!
//! An [`Engine`] is a Tokio task fed by a [`Router`]. Everything that
//! reaches the machine (user intents, ticks, timer expiries, derived
//! events) goes through the router's queue, one input at a time.
//! [`Session`] adds restart by teardown and rebuild.

mod engine;
mod error;
pub mod feedback;
mod router;
mod session;
mod timers;

pub use engine::{Engine, EngineHandle, Inspection};
pub use error::EngineError;
pub use feedback::derived_event;
pub use router::{Router, Subscriber};
pub use session::Session;
