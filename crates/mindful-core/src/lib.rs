//! # Mindful Core Library
//!
//! This library provides the core logic for the Mindful guided-session
//! companion. Every operation is available through the standalone `mindful`
//! CLI, which is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Session Engine**: A logical-clock state machine. The caller invokes
//!   `tick()` once per second; each call consumes exactly one second of
//!   session time and, for breathing sessions, drives the phase cycle.
//! - **Runner**: A tokio interval that plays the role of the periodic
//!   scheduler and forwards engine events to the host.
//! - **Presets**: Breathing pattern parsing, the meditation/breathing catalog
//!   and mood-based recommendations.
//! - **Insights**: Sliding-window mood heuristics over a mood time series.
//! - **Storage**: TOML-based configuration.
//!
//! ## Key Components
//!
//! - [`SessionTimerEngine`]: Owns the active session and emits [`Event`]s
//! - [`SessionState`]: Pure `start`/`tick`/`stop` state transitions
//! - [`SessionRunner`]: Drives an engine at a fixed cadence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod insights;
pub mod presets;
pub mod session;
pub mod storage;

pub use error::{ConfigError, CoreError, PresetError, ValidationError};
pub use events::Event;
pub use insights::{analyze, sample_entries, stats, MoodEntry, MoodInsight, MoodLevel, MoodStats};
pub use presets::{
    format_clock, recommendations_for, BreathingExercise, CopingTechnique, MeditationSession,
    Recommendations,
};
pub use session::{
    BreathPhase, BreathingPattern, SessionConfig, SessionKind, SessionRunner, SessionState,
    SessionTimerEngine,
};
pub use storage::Config;
