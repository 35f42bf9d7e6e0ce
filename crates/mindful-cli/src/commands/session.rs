use std::time::Duration;

use clap::Subcommand;
use mindful_core::presets::{self, format_clock};
use mindful_core::{
    Config, Event, SessionConfig, SessionKind, SessionRunner, SessionState, SessionTimerEngine,
};
use tokio::sync::oneshot;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Run a guided meditation countdown
    Meditate {
        /// Catalog id or title (see `mindful catalog meditations`)
        session: Option<String>,
        /// Length in minutes (overrides the catalog entry)
        #[arg(long)]
        minutes: Option<u32>,
        #[command(flatten)]
        live: LiveArgs,
    },
    /// Run a breathing exercise
    Breathe {
        /// Preset (box, 4-7-8) or pattern such as 5-5-5; defaults to config
        pattern: Option<String>,
        /// Length in minutes
        #[arg(long, conflicts_with = "seconds")]
        minutes: Option<u32>,
        /// Length in seconds
        #[arg(long)]
        seconds: Option<u32>,
        #[command(flatten)]
        live: LiveArgs,
    },
    /// Tick a session instantly and print its state as JSON
    Simulate {
        /// Preset, pattern, or `timed`
        target: String,
        /// Session length in seconds
        #[arg(long)]
        seconds: u32,
        /// Number of ticks to apply (defaults to the full session)
        #[arg(long)]
        ticks: Option<u32>,
        /// Include every event emitted along the way
        #[arg(long)]
        events: bool,
    },
}

#[derive(clap::Args)]
pub struct LiveArgs {
    /// Milliseconds between ticks (defaults to config runner.tick_interval_ms)
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        SessionAction::Meditate {
            session,
            minutes,
            live,
        } => {
            let session_config = meditation_config(&config, session.as_deref(), minutes)?;
            run_live(&config, session_config, &live)
        }
        SessionAction::Breathe {
            pattern,
            minutes,
            seconds,
            live,
        } => {
            let session_config = breathing_config(&config, pattern.as_deref(), minutes, seconds)?;
            run_live(&config, session_config, &live)
        }
        SessionAction::Simulate {
            target,
            seconds,
            ticks,
            events,
        } => simulate(&target, seconds, ticks, events),
    }
}

fn meditation_config(
    config: &Config,
    session: Option<&str>,
    minutes: Option<u32>,
) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    let Some(key) = session else {
        return Ok(config.meditation_session(minutes));
    };
    let mut session = presets::find_meditation(key)
        .ok_or_else(|| format!("unknown meditation: {key}"))?
        .session_config();
    if let Some(minutes) = minutes {
        session.duration_secs = minutes.saturating_mul(60);
    }
    Ok(session)
}

fn breathing_config(
    config: &Config,
    pattern: Option<&str>,
    minutes: Option<u32>,
    seconds: Option<u32>,
) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    let name = pattern.unwrap_or(&config.breathing.default_preset);
    let duration_secs = match (seconds, minutes) {
        (Some(secs), _) => secs,
        (None, Some(minutes)) => minutes.saturating_mul(60),
        (None, None) => presets::find_breathing(name)
            .map(|b| b.duration_min)
            .unwrap_or(config.breathing.default_minutes)
            .saturating_mul(60),
    };

    // Free-form exercises like belly breathing run as a plain countdown.
    if let Some(exercise) = presets::find_breathing(name) {
        let mut session = exercise.session_config()?;
        session.duration_secs = duration_secs;
        return Ok(session);
    }
    Ok(SessionConfig::breathing(duration_secs, presets::resolve_pattern(name)?))
}

fn run_live(
    config: &Config,
    session: SessionConfig,
    live: &LiveArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let period = live
        .tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.tick_interval());
    let json = live.json || config.display.json_output;
    let show_phase = config.display.show_phase_countdown;
    let pattern = session.pattern().map(|p| p.notation());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let state = rt.block_on(async {
        let (stop_tx, stop_rx) = oneshot::channel();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = stop_tx.send(());
            }
        });

        let runner = SessionRunner::new(period);
        let on_event = |event: &Event| {
            if json {
                match serde_json::to_string(event) {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::warn!("cannot encode event: {e}"),
                }
            } else if let Some(line) = render(event, pattern.as_deref(), show_phase) {
                println!("{line}");
            }
        };
        let on_tick = |state: &SessionState| {
            if json || !show_phase {
                return;
            }
            if let Some(line) = countdown_line(state) {
                println!("{line}");
            }
        };
        runner
            .run_with_progress(session, stop_rx, on_event, on_tick)
            .await
    })?;

    tracing::debug!(
        remaining_secs = state.remaining_secs(),
        completed_cycles = state.completed_cycles(),
        "live session finished"
    );
    Ok(())
}

fn render(event: &Event, pattern: Option<&str>, show_phase: bool) -> Option<String> {
    match event {
        Event::SessionStarted {
            kind,
            duration_secs,
            phase_name,
            ..
        } => Some(match (kind, pattern) {
            (SessionKind::Breathing, Some(p)) => format!(
                "Breathing {p} for {}. Begin: {}",
                format_clock(*duration_secs),
                phase_name.as_deref().unwrap_or("inhale")
            ),
            _ => format!("Meditation for {}", format_clock(*duration_secs)),
        }),
        Event::PhaseChanged {
            phase_name,
            phase_secs,
            remaining_secs,
            ..
        } => Some(if show_phase {
            format!("[{}] {phase_name} ({phase_secs}s)", format_clock(*remaining_secs))
        } else {
            phase_name.clone()
        }),
        Event::CycleCompleted {
            completed_cycles, ..
        } => Some(format!("Cycle {completed_cycles} complete")),
        Event::SessionCompleted {
            completed_cycles,
            kind,
            ..
        } => Some(match kind {
            SessionKind::Breathing => {
                format!("Session complete after {completed_cycles} cycle(s)")
            }
            SessionKind::Timed => "Session complete".to_string(),
        }),
        Event::SessionStopped { remaining_secs, .. } => Some(format!(
            "Session stopped with {} remaining",
            format_clock(*remaining_secs)
        )),
        Event::StateSnapshot { .. } => None,
    }
}

/// Whole-minute countdown for timed sessions, which emit no events while
/// they run.
fn countdown_line(state: &SessionState) -> Option<String> {
    let remaining = state.remaining_secs();
    if state.kind() != SessionKind::Timed || remaining == 0 || remaining % 60 != 0 {
        return None;
    }
    Some(format!("{} remaining", format_clock(remaining)))
}

fn simulate(
    target: &str,
    seconds: u32,
    ticks: Option<u32>,
    with_events: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = if target.eq_ignore_ascii_case("timed") {
        SessionConfig::timed(seconds)
    } else {
        SessionConfig::breathing(seconds, presets::resolve_pattern(target)?)
    };

    let mut engine = SessionTimerEngine::new();
    let mut events = vec![engine.start(session)?];
    for _ in 0..ticks.unwrap_or(seconds) {
        events.extend(engine.tick());
    }

    let snapshot = engine.snapshot().ok_or("no active session")?;
    let output = if with_events {
        serde_json::json!({ "snapshot": snapshot, "events": events })
    } else {
        serde_json::json!({ "snapshot": snapshot })
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
