use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::SessionKind;

/// Every state change of a session produces an Event.
/// The presentation layer renders them; the runner forwards them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        session_id: Uuid,
        kind: SessionKind,
        duration_secs: u32,
        /// Name of the first phase for breathing sessions.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phase_name: Option<String>,
        at: DateTime<Utc>,
    },
    /// A breathing session entered a new phase.
    PhaseChanged {
        session_id: Uuid,
        phase_index: usize,
        phase_name: String,
        phase_secs: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The phase index wrapped back to 0.
    CycleCompleted {
        session_id: Uuid,
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero.
    SessionCompleted {
        session_id: Uuid,
        kind: SessionKind,
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    /// The session was stopped before its countdown ran out.
    SessionStopped {
        session_id: Uuid,
        remaining_secs: u32,
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        session_id: Uuid,
        kind: SessionKind,
        is_running: bool,
        remaining_secs: u32,
        duration_secs: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phase_index: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phase_name: Option<String>,
        phase_remaining_secs: u32,
        completed_cycles: u32,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn session_id(&self) -> Uuid {
        match self {
            Event::SessionStarted { session_id, .. }
            | Event::PhaseChanged { session_id, .. }
            | Event::CycleCompleted { session_id, .. }
            | Event::SessionCompleted { session_id, .. }
            | Event::SessionStopped { session_id, .. }
            | Event::StateSnapshot { session_id, .. } => *session_id,
        }
    }

    /// True for events after which the session no longer runs.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Event::SessionCompleted { .. } | Event::SessionStopped { .. }
        )
    }
}
