//! The single FIFO channel feeding an engine.
//!
//! User intents, periodic ticks, timer expiries and derived events all
//! travel through one unbounded queue, so the engine sees them strictly
//! in arrival order and never evaluates two at once.

use crate::machine::Snapshot;
use crate::pet::{EventError, PetEvent};
use crate::runtime::engine::Inspection;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Callback invoked with each reported snapshot.
pub type Subscriber = Arc<dyn Fn(&Snapshot) + Send + Sync>;

pub(crate) enum Input {
    Event(PetEvent),
    /// Expiry of the state-entry timer armed in `epoch`.
    StateTimeout { epoch: u64 },
    Subscribe(Subscriber),
    Inspect(oneshot::Sender<Inspection>),
    Stop,
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Event(event) => write!(f, "Event({event})"),
            Input::StateTimeout { epoch } => write!(f, "StateTimeout({epoch})"),
            Input::Subscribe(_) => f.write_str("Subscribe"),
            Input::Inspect(_) => f.write_str("Inspect"),
            Input::Stop => f.write_str("Stop"),
        }
    }
}

/// Cloneable sending side of an engine's queue.
///
/// Sending never blocks. Once the engine has stopped, inputs are logged
/// and dropped.
#[derive(Clone, Debug)]
pub struct Router {
    tx: mpsc::UnboundedSender<Input>,
}

impl Router {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<Input>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue an event. Returns `false` if the engine has stopped.
    pub fn send(&self, event: PetEvent) -> bool {
        self.push(Input::Event(event))
    }

    /// Validate an untyped `(type, food)` pair and queue it.
    pub fn send_raw(&self, kind: &str, food: Option<&str>) -> Result<bool, EventError> {
        let event = PetEvent::parse(kind, food)?;
        Ok(self.send(event))
    }

    /// Register a callback. It is invoked once with the current snapshot
    /// as soon as the engine handles the registration.
    pub fn subscribe<F>(&self, callback: F) -> bool
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.subscribe_shared(Arc::new(callback))
    }

    pub(crate) fn subscribe_shared(&self, subscriber: Subscriber) -> bool {
        self.push(Input::Subscribe(subscriber))
    }

    pub(crate) fn inspect(&self, reply: oneshot::Sender<Inspection>) -> bool {
        self.push(Input::Inspect(reply))
    }

    pub(crate) fn state_timeout(&self, epoch: u64) -> bool {
        self.push(Input::StateTimeout { epoch })
    }

    /// Ask the engine to stop after the inputs already queued.
    pub fn stop(&self) {
        self.push(Input::Stop);
    }

    /// Whether the engine behind this router has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn push(&self, input: Input) -> bool {
        match self.tx.send(input) {
            Ok(()) => true,
            Err(mpsc::error::SendError(input)) => {
                debug!(?input, "engine stopped, dropping input");
                false
            }
        }
    }
}
