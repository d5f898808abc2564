//! A restartable game session.
//!
//! Restarting never resets an engine in place: the running engine is
//! stopped and a fresh one is started from the same config, with the
//! session's subscribers re-attached. Subscribers are gated by engine
//! generation, so nothing a retired engine still has queued reaches them.

use crate::config::EngineConfig;
use crate::machine::Snapshot;
use crate::pet::{FunFactSource, PetEvent, RandomFunFacts};
use crate::runtime::engine::{Engine, EngineHandle};
use crate::runtime::error::EngineError;
use crate::runtime::router::Subscriber;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// The generation whose engine may currently notify subscribers.
#[derive(Clone, Default)]
struct Gate(Arc<Mutex<u64>>);

impl Gate {
    fn open(&self, generation: u64) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = generation;
    }

    /// Wrap `subscriber` so it only fires while `generation` is current.
    ///
    /// The lock is held across delivery, so once [`Gate::open`] returns
    /// no older engine is mid-notification.
    fn attach(&self, generation: u64, subscriber: &Subscriber) -> Subscriber {
        let gate = self.clone();
        let subscriber = Arc::clone(subscriber);
        Arc::new(move |snapshot: &Snapshot| {
            let current = gate.0.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == generation {
                subscriber(snapshot);
            } else {
                debug!(generation, current = *current, "dropped snapshot from retired engine");
            }
        })
    }
}

pub struct Session {
    config: EngineConfig,
    facts: Arc<dyn FunFactSource>,
    subscribers: Vec<Subscriber>,
    engine: Option<EngineHandle>,
    generation: u64,
    gate: Gate,
}

impl Session {
    /// A session that has not started yet.
    pub fn new(config: EngineConfig) -> Self {
        let facts = Arc::new(RandomFunFacts::new(config.fun_facts.clone()));
        Self::with_facts(config, facts)
    }

    pub fn with_facts(config: EngineConfig, facts: Arc<dyn FunFactSource>) -> Self {
        Self {
            config,
            facts,
            subscribers: Vec::new(),
            engine: None,
            generation: 0,
            gate: Gate::default(),
        }
    }

    /// Start a fresh engine, stopping the current one if any.
    ///
    /// From the moment this returns, subscribers only hear from the new
    /// engine.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if let Some(previous) = self.engine.take() {
            previous.stop();
        }

        let engine = Engine::start_with(&self.config, Arc::clone(&self.facts))?;
        let generation = self.generation + 1;
        self.gate.open(generation);
        for subscriber in &self.subscribers {
            engine.subscribe_shared(self.gate.attach(generation, subscriber));
        }

        self.generation = generation;
        info!(engine = %engine.id(), generation, "session started");
        self.engine = Some(engine);
        Ok(())
    }

    /// Forward an event to the running engine.
    ///
    /// `RESTART_GAME` is handled by the session itself: the current engine
    /// is retired without seeing it and a fresh one takes over, whatever
    /// state the pet was in.
    pub fn send(&mut self, event: PetEvent) -> Result<(), EngineError> {
        let engine = self.engine.as_ref().ok_or(EngineError::NotRunning)?;
        if event == PetEvent::RestartGame {
            return self.restart();
        }
        if engine.send(event) {
            Ok(())
        } else {
            Err(EngineError::NotRunning)
        }
    }

    /// Validate an untyped `(type, food)` pair and forward it.
    pub fn send_raw(&mut self, kind: &str, food: Option<&str>) -> Result<(), EngineError> {
        let event = PetEvent::parse(kind, food)?;
        self.send(event)
    }

    /// Register a callback that survives restarts.
    ///
    /// Each engine the session starts invokes it once on attach, then
    /// after every processed event.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let subscriber: Subscriber = Arc::new(callback);
        if let Some(engine) = &self.engine {
            engine.subscribe_shared(self.gate.attach(self.generation, &subscriber));
        }
        self.subscribers.push(subscriber);
    }

    pub fn restart(&mut self) -> Result<(), EngineError> {
        info!(generation = self.generation, "restarting session");
        self.start()
    }

    /// Stop the running engine and wait for its task to finish.
    pub async fn shutdown(&mut self) -> Result<(), EngineError> {
        match self.engine.take() {
            Some(engine) => {
                info!(engine = %engine.id(), "session shutting down");
                engine.shutdown().await
            }
            None => Ok(()),
        }
    }

    pub fn stop(&mut self) {
        if let Some(engine) = self.engine.take() {
            info!(engine = %engine.id(), "session stopped");
            engine.stop();
        }
    }

    pub fn engine(&self) -> Option<&EngineHandle> {
        self.engine.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.engine.as_ref().is_some_and(EngineHandle::is_running)
    }

    /// Number of engines this session has started.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
