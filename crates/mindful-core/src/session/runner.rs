//! Periodic scheduler for a session engine.
//!
//! The runner is the host-side collaborator that ticks a session at a fixed
//! cadence, the way a host would call [`super::SessionTimerEngine::tick`].
//! The session lives only for the duration of [`SessionRunner::run`];
//! cancelling is a matter of firing the stop signal (or dropping the future).

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use super::config::SessionConfig;
use super::engine::ActiveSession;
use super::state::SessionState;
use crate::error::ValidationError;
use crate::events::Event;

/// Default cadence: one logical second per wall-clock second.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct SessionRunner {
    period: Duration,
}

impl Default for SessionRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl SessionRunner {
    /// A zero period is bumped to one millisecond; tokio rejects zero.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run a session to completion or until `stop` fires.
    ///
    /// Every engine event, including `SessionStarted`, is passed to
    /// `on_event`. A dropped stop sender never stops the session. Returns the
    /// final (frozen) state.
    pub async fn run<F>(
        &self,
        config: SessionConfig,
        stop: oneshot::Receiver<()>,
        on_event: F,
    ) -> Result<SessionState, ValidationError>
    where
        F: FnMut(&Event),
    {
        self.run_with_progress(config, stop, on_event, |_| {}).await
    }

    /// Like [`run`](Self::run), and also hands the state to `on_tick` after
    /// every tick, once that tick's events have been delivered.
    pub async fn run_with_progress<F, P>(
        &self,
        config: SessionConfig,
        mut stop: oneshot::Receiver<()>,
        mut on_event: F,
        mut on_tick: P,
    ) -> Result<SessionState, ValidationError>
    where
        F: FnMut(&Event),
        P: FnMut(&SessionState),
    {
        let (mut session, started) = ActiveSession::begin(config)?;
        on_event(&started);

        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        let mut stop_closed = false;
        while session.state.is_running() {
            tokio::select! {
                biased;
                res = &mut stop, if !stop_closed => {
                    match res {
                        Ok(()) => {
                            if let Some(event) = session.stop() {
                                on_event(&event);
                            }
                        }
                        Err(_) => {
                            debug!("stop sender dropped; session continues");
                            stop_closed = true;
                        }
                    }
                }
                _ = interval.tick() => {
                    for event in session.tick() {
                        on_event(&event);
                    }
                    on_tick(&session.state);
                }
            }
        }

        Ok(session.state)
    }
}
