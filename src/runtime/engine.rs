//! The engine task: the imperative shell around [`PetMachine`].
//!
//! One engine is one Tokio task owning one machine. It drains its
//! router's queue one input at a time, manages the state-entry timer and
//! the periodic ticker, and reports snapshots to subscribers.

use crate::config::EngineConfig;
use crate::core::StateHistory;
use crate::machine::{PetMachine, Snapshot, StepResult, TransitionTable};
use crate::pet::{EventError, FunFactSource, PetEvent, PetState, RandomFunFacts};
use crate::runtime::error::EngineError;
use crate::runtime::feedback;
use crate::runtime::router::{Input, Router, Subscriber};
use crate::runtime::timers::{StateTimer, Ticker};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, trace, Instrument};
use uuid::Uuid;

/// Point-in-time view of a running engine.
#[derive(Clone, Debug)]
pub struct Inspection {
    pub snapshot: Snapshot,
    pub history: StateHistory<PetState>,
}

pub struct Engine {
    machine: PetMachine,
    router: Router,
    inbox: mpsc::UnboundedReceiver<Input>,
    subscribers: Vec<Subscriber>,
    timer: StateTimer,
    ticker: Ticker,
    epoch: u64,
}

impl Engine {
    /// Start an engine that picks fun facts at random from the config.
    pub fn start(config: &EngineConfig) -> Result<EngineHandle, EngineError> {
        let facts = Arc::new(RandomFunFacts::new(config.fun_facts.clone()));
        Self::start_with(config, facts)
    }

    /// Start an engine with a caller-supplied fun-fact source.
    ///
    /// Must be called from within a Tokio runtime. The engine is in
    /// `healthy_normal` with the default context and its ticker armed.
    pub fn start_with(
        config: &EngineConfig,
        facts: Arc<dyn FunFactSource>,
    ) -> Result<EngineHandle, EngineError> {
        let config = config.clone().validated()?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| EngineError::NoRuntime)?;
        let table = TransitionTable::standard(config.state_timeout())?;

        let id = Uuid::new_v4();
        let (router, inbox) = Router::channel();
        let engine = Engine {
            machine: PetMachine::new(Arc::new(table), facts)
                .with_history_limit(config.history_limit),
            router: router.clone(),
            inbox,
            subscribers: vec![feedback::observer(router.clone())],
            timer: StateTimer::default(),
            ticker: Ticker::new(config.tick_interval()),
            epoch: 0,
        };

        let span = info_span!("engine", id = %id);
        let task = runtime.spawn(engine.run().instrument(span));
        info!(engine = %id, "engine started");

        Ok(EngineHandle {
            id,
            router,
            task: Some(task),
        })
    }

    async fn run(mut self) {
        self.ticker.sync(self.machine.current_state(), &self.router);

        while let Some(input) = self.inbox.recv().await {
            match input {
                Input::Event(event) => {
                    let result = self.machine.send(&event);
                    self.settle(result);
                }
                Input::StateTimeout { epoch } if epoch == self.epoch => {
                    let result = self.machine.fire_timer();
                    self.settle(result);
                }
                Input::StateTimeout { epoch } => {
                    trace!(epoch, current = self.epoch, "stale state timeout");
                }
                Input::Subscribe(subscriber) => {
                    subscriber(&self.machine.snapshot());
                    self.subscribers.push(subscriber);
                }
                Input::Inspect(reply) => {
                    let _ = reply.send(Inspection {
                        snapshot: self.machine.snapshot(),
                        history: self.machine.history().clone(),
                    });
                }
                Input::Stop => break,
            }
        }

        self.inbox.close();
        self.ticker.disarm();
        self.timer.cancel();
        self.subscribers.clear();
        info!(state = %self.machine.current_state(), "engine stopped");
    }

    fn settle(&mut self, result: StepResult) {
        if let StepResult::Transitioned { .. } = result {
            self.epoch += 1;
            self.timer.cancel();
            if let Some(delay) = self.machine.pending_timer() {
                self.timer.arm(delay, self.epoch, self.router.clone());
            }
        }

        if !result.is_processed() {
            return;
        }

        self.ticker.sync(self.machine.current_state(), &self.router);

        let snapshot = self.machine.snapshot();
        debug!(state = %snapshot.state, subscribers = self.subscribers.len(), "notifying");
        for subscriber in &self.subscribers {
            subscriber(&snapshot);
        }
    }
}

/// Owner's handle to a running engine.
///
/// Dropping the handle stops the engine.
#[derive(Debug)]
pub struct EngineHandle {
    id: Uuid,
    router: Router,
    task: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// A router for feeding the engine from elsewhere.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn send(&self, event: PetEvent) -> bool {
        self.router.send(event)
    }

    pub fn send_raw(&self, kind: &str, food: Option<&str>) -> Result<bool, EventError> {
        self.router.send_raw(kind, food)
    }

    pub fn subscribe<F>(&self, callback: F) -> bool
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.router.subscribe(callback)
    }

    pub(crate) fn subscribe_shared(&self, subscriber: Subscriber) -> bool {
        self.router.subscribe_shared(subscriber)
    }

    /// Snapshot and history once every input queued before this call
    /// has been handled. `None` if the engine has stopped.
    pub async fn inspect(&self) -> Option<Inspection> {
        let (tx, rx) = oneshot::channel();
        if !self.router.inspect(tx) {
            return None;
        }
        rx.await.ok()
    }

    pub async fn snapshot(&self) -> Option<Snapshot> {
        self.inspect().await.map(|i| i.snapshot)
    }

    pub fn is_running(&self) -> bool {
        !self.router.is_closed()
    }

    /// Stop after the inputs already queued. Timers are torn down and
    /// subscribers released; later sends are dropped.
    pub fn stop(&self) {
        self.router.stop();
    }

    /// Stop and wait for the engine task to finish.
    pub async fn shutdown(mut self) -> Result<(), EngineError> {
        self.router.stop();
        if let Some(task) = self.task.take() {
            task.await?;
        }
        Ok(())
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            self.router.stop();
        }
    }
}
