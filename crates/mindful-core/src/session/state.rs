//! Session state and its pure transitions.
//!
//! `SessionState` is a logical clock: every `tick` consumes exactly one
//! second of session time no matter how often it is called. Wall-clock
//! cadence is the scheduler's job (see [`super::SessionRunner`]).
//!
//! ## Breathing phase machine
//!
//! ```text
//! phase 0 -> phase 1 -> ... -> phase N-1 -> phase 0 (completed_cycles += 1)
//! ```
//!
//! Phase cycling has no terminal state. The outer countdown stops the whole
//! session when it reaches zero, even in the middle of a phase.

use serde::{Deserialize, Serialize};

use super::config::{SessionConfig, SessionKind};
use super::pattern::BreathPhase;
use crate::error::ValidationError;

/// What a single tick changed. Used by the engine to build events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TickOutcome {
    /// Index of the phase entered during this tick.
    pub phase_entered: Option<usize>,
    pub cycle_completed: bool,
    pub session_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    config: SessionConfig,
    remaining_secs: u32,
    is_running: bool,
    current_phase_index: usize,
    phase_remaining_secs: u32,
    completed_cycles: u32,
}

impl SessionState {
    /// Validate `config` and create a fresh running state.
    pub fn start(config: SessionConfig) -> Result<Self, ValidationError> {
        config.validate()?;

        let phase_remaining_secs = config
            .pattern()
            .and_then(|p| p.get(0))
            .map(|p| p.seconds)
            .unwrap_or(0);

        Ok(Self {
            remaining_secs: config.duration_secs,
            is_running: true,
            current_phase_index: 0,
            phase_remaining_secs,
            completed_cycles: 0,
            config,
        })
    }

    /// Advance by one logical second. Returns the state unchanged when the
    /// session is not running.
    #[must_use]
    pub fn tick(mut self) -> Self {
        self.advance();
        self
    }

    /// Freeze the session. Idempotent.
    #[must_use]
    pub fn stop(mut self) -> Self {
        self.halt();
        self
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_secs == 0
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn kind(&self) -> SessionKind {
        self.config.kind
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn current_phase_index(&self) -> usize {
        self.current_phase_index
    }

    /// Current breathing phase, `None` for timed sessions.
    pub fn current_phase(&self) -> Option<&BreathPhase> {
        self.config
            .pattern()
            .and_then(|p| p.get(self.current_phase_index))
    }

    pub fn phase_remaining_secs(&self) -> u32 {
        self.phase_remaining_secs
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.config.duration_secs.saturating_sub(self.remaining_secs)
    }

    /// 0.0 .. 100.0 progress across the session.
    pub fn progress_pct(&self) -> f64 {
        if self.config.duration_secs == 0 {
            return 0.0;
        }
        (f64::from(self.elapsed_secs()) / f64::from(self.config.duration_secs) * 100.0).min(100.0)
    }

    // ── Internal ─────────────────────────────────────────────────────

    pub(crate) fn halt(&mut self) {
        self.is_running = false;
    }

    pub(crate) fn advance(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.is_running {
            return outcome;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);

        if let Some(pattern) = self.config.pattern() {
            self.phase_remaining_secs = self.phase_remaining_secs.saturating_sub(1);
            if self.phase_remaining_secs == 0 && !pattern.is_empty() {
                let next = (self.current_phase_index + 1) % pattern.len();
                self.current_phase_index = next;
                self.phase_remaining_secs = pattern.get(next).map(|p| p.seconds).unwrap_or(0);
                outcome.phase_entered = Some(next);
                if next == 0 {
                    self.completed_cycles += 1;
                    outcome.cycle_completed = true;
                }
            }
        }

        // Checked last so the final tick still shows its phase transition.
        if self.remaining_secs == 0 {
            self.is_running = false;
            outcome.session_completed = true;
        }

        outcome
    }
}
