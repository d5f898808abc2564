//! Timer tasks owned by an engine.
//!
//! Both timers only ever talk to the engine through its [`Router`]; an
//! expiry is just another queued input.

use crate::pet::{PetEvent, PetState};
use crate::runtime::router::Router;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// One-shot timer for the `after` transition of the current state.
///
/// Expiries carry the epoch they were armed in so the engine can drop
/// one that was already queued when the state changed.
#[derive(Debug, Default)]
pub(crate) struct StateTimer {
    task: Option<JoinHandle<()>>,
}

impl StateTimer {
    pub fn arm(&mut self, delay: Duration, epoch: u64, router: Router) {
        self.cancel();
        trace!(?delay, epoch, "arming state timer");
        self.task = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            router.state_timeout(epoch);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for StateTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Periodic `time_check` source.
///
/// Armed only while the current state ticks; the first tick comes one
/// full period after arming.
#[derive(Debug)]
pub(crate) struct Ticker {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    pub fn arm(&mut self, router: Router) {
        if self.task.is_some() {
            return;
        }
        let period = self.period;
        trace!(?period, "arming ticker");
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !router.send(PetEvent::TimeCheck) {
                    break;
                }
            }
        }));
    }

    pub fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            trace!("disarming ticker");
            task.abort();
        }
    }

    /// Arm or disarm to match `state`.
    pub fn sync(&mut self, state: PetState, router: &Router) {
        if state.ticks() {
            self.arm(router.clone());
        } else {
            self.disarm();
        }
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::router::Input;

    #[tokio::test(start_paused = true)]
    async fn state_timer_fires_once_after_delay() {
        let (router, mut rx) = Router::channel();
        let mut timer = StateTimer::default();

        timer.arm(Duration::from_millis(5000), 3, router);

        time::sleep(Duration::from_millis(4999)).await;
        assert!(rx.try_recv().is_err());

        time::sleep(Duration::from_millis(2)).await;
        assert!(matches!(rx.recv().await, Some(Input::StateTimeout { epoch: 3 })));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_state_timer_stays_silent() {
        let (router, mut rx) = Router::channel();
        let mut timer = StateTimer::default();

        timer.arm(Duration::from_millis(100), 1, router);
        timer.cancel();
        assert!(!timer.is_armed());

        time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_follows_state() {
        let (router, mut rx) = Router::channel();
        let mut ticker = Ticker::new(Duration::from_millis(1000));

        ticker.sync(PetState::HealthyNormal, &router);
        assert!(ticker.is_armed());

        time::sleep(Duration::from_millis(2500)).await;
        for _ in 0..2 {
            assert!(matches!(rx.recv().await, Some(Input::Event(PetEvent::TimeCheck))));
        }

        ticker.sync(PetState::Paused, &router);
        assert!(!ticker.is_armed());

        time::sleep(Duration::from_millis(5000)).await;
        assert!(rx.try_recv().is_err());
    }
}
