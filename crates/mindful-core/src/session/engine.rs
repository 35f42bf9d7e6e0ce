//! Session timer engine.
//!
//! The engine owns at most one session at a time and turns the pure
//! [`SessionState`] transitions into [`Event`]s for the presentation layer.
//! It does not use internal threads - the caller is responsible for calling
//! `tick()` once per second (see [`super::SessionRunner`]).
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionTimerEngine::new();
//! engine.start(SessionConfig::breathing(300, BreathingPattern::parse("4-7-8")?))?;
//! // Once per second:
//! for event in engine.tick() { render(event); }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::SessionConfig;
use super::state::SessionState;
use crate::error::ValidationError;
use crate::events::Event;

/// A started session and its identity. Shared by the engine and the runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ActiveSession {
    pub(crate) id: Uuid,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) state: SessionState,
}

impl ActiveSession {
    pub(crate) fn begin(config: SessionConfig) -> Result<(Self, Event), ValidationError> {
        let state = SessionState::start(config).inspect_err(|e| {
            warn!("rejected session config: {e}");
        })?;

        let id = Uuid::new_v4();
        let at = Utc::now();
        info!(
            session_id = %id,
            kind = ?state.kind(),
            duration_secs = state.config().duration_secs,
            "session started"
        );

        let event = Event::SessionStarted {
            session_id: id,
            kind: state.kind(),
            duration_secs: state.config().duration_secs,
            phase_name: state.current_phase().map(|p| p.name.clone()),
            at,
        };
        let session = Self {
            id,
            started_at: at,
            state,
        };
        Ok((session, event))
    }

    pub(crate) fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        let outcome = self.state.advance();
        let state = &self.state;
        let at = Utc::now();

        if let Some(index) = outcome.phase_entered {
            if let Some(phase) = state.current_phase() {
                debug!(
                    session_id = %self.id,
                    phase = %phase.name,
                    phase_index = index,
                    "phase changed"
                );
                events.push(Event::PhaseChanged {
                    session_id: self.id,
                    phase_index: index,
                    phase_name: phase.name.clone(),
                    phase_secs: phase.seconds,
                    remaining_secs: state.remaining_secs(),
                    at,
                });
            }
        }

        if outcome.cycle_completed {
            debug!(
                session_id = %self.id,
                completed_cycles = state.completed_cycles(),
                "cycle completed"
            );
            events.push(Event::CycleCompleted {
                session_id: self.id,
                completed_cycles: state.completed_cycles(),
                at,
            });
        }

        if outcome.session_completed {
            info!(
                session_id = %self.id,
                completed_cycles = state.completed_cycles(),
                "session completed"
            );
            events.push(Event::SessionCompleted {
                session_id: self.id,
                kind: state.kind(),
                completed_cycles: state.completed_cycles(),
                at,
            });
        }

        events
    }

    pub(crate) fn stop(&mut self) -> Option<Event> {
        if !self.state.is_running() {
            return None;
        }
        self.state.halt();
        info!(
            session_id = %self.id,
            remaining_secs = self.state.remaining_secs(),
            "session stopped"
        );
        Some(Event::SessionStopped {
            session_id: self.id,
            remaining_secs: self.state.remaining_secs(),
            completed_cycles: self.state.completed_cycles(),
            at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionTimerEngine {
    #[serde(default)]
    session: Option<ActiveSession>,
}

impl SessionTimerEngine {
    /// Create an engine with no session.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> Option<&SessionState> {
        self.session.as_ref().map(|s| &s.state)
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.session.as_ref().map(|s| s.started_at)
    }

    pub fn is_running(&self) -> bool {
        self.state().is_some_and(SessionState::is_running)
    }

    pub fn is_complete(&self) -> bool {
        self.state().is_some_and(SessionState::is_complete)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Option<Event> {
        let session = self.session.as_ref()?;
        let state = &session.state;
        let phase = state.current_phase();
        Some(Event::StateSnapshot {
            session_id: session.id,
            kind: state.kind(),
            is_running: state.is_running(),
            remaining_secs: state.remaining_secs(),
            duration_secs: state.config().duration_secs,
            phase_index: phase.map(|_| state.current_phase_index()),
            phase_name: phase.map(|p| p.name.clone()),
            phase_remaining_secs: state.phase_remaining_secs(),
            completed_cycles: state.completed_cycles(),
            progress_pct: state.progress_pct(),
            at: Utc::now(),
        })
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a new session, replacing any previous one.
    ///
    /// On an invalid config the previous session is left untouched.
    pub fn start(&mut self, config: SessionConfig) -> Result<Event, ValidationError> {
        let (session, event) = ActiveSession::begin(config)?;
        self.session = Some(session);
        Ok(event)
    }

    /// Advance the active session by one second.
    ///
    /// Returns the events produced by this tick, in order: phase change,
    /// cycle completion, session completion. Empty when idle or stopped.
    pub fn tick(&mut self) -> Vec<Event> {
        self.session
            .as_mut()
            .map(ActiveSession::tick)
            .unwrap_or_default()
    }

    /// Stop the active session, freezing its state for display.
    ///
    /// Returns `SessionStopped` only when a running session was halted;
    /// repeated calls are no-ops.
    pub fn stop(&mut self) -> Option<Event> {
        self.session.as_mut()?.stop()
    }

    /// Discard the session, returning its final state.
    pub fn clear(&mut self) -> Option<SessionState> {
        self.session.take().map(|s| s.state)
    }
}
