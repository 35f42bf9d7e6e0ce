mod config;
mod engine;
mod pattern;
mod runner;
mod state;

pub use config::{SessionConfig, SessionKind};
pub use engine::SessionTimerEngine;
pub use pattern::{BreathPhase, BreathingPattern};
pub use runner::{SessionRunner, DEFAULT_TICK_INTERVAL};
pub use state::SessionState;
