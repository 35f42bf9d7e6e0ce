use serde::{Deserialize, Serialize};

use crate::error::PresetError;

/// Phase names for three-phase patterns such as 4-7-8.
const THREE_PHASE_NAMES: [&str; 3] = ["inhale", "hold", "exhale"];
/// Phase names for four-phase patterns such as box breathing.
const FOUR_PHASE_NAMES: [&str; 4] = ["inhale", "hold", "exhale", "hold"];

/// One named segment of a breathing pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathPhase {
    pub name: String,
    /// Duration in seconds.
    pub seconds: u32,
}

impl BreathPhase {
    pub fn new(name: impl Into<String>, seconds: u32) -> Self {
        Self {
            name: name.into(),
            seconds,
        }
    }
}

/// Ordered sequence of breathing phases.
///
/// Construction does not validate; `SessionState::start` is the single
/// place where phase count and durations are checked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreathingPattern {
    phases: Vec<BreathPhase>,
}

impl BreathingPattern {
    pub fn new(phases: Vec<BreathPhase>) -> Self {
        Self { phases }
    }

    /// Parse a dash-separated seconds string like `"4-7-8"` or `"4-4-4-4"`.
    ///
    /// Three numbers become inhale/hold/exhale, four numbers become
    /// inhale/hold/exhale/hold.
    pub fn parse(pattern: &str) -> Result<Self, PresetError> {
        let trimmed = pattern.trim();
        let parts: Vec<&str> = trimmed.split('-').map(str::trim).collect();

        if parts.iter().all(|p| p.parse::<u32>().is_err()) {
            return Err(PresetError::Untimed(trimmed.to_string()));
        }

        let names: &[&str] = match parts.len() {
            3 => &THREE_PHASE_NAMES,
            4 => &FOUR_PHASE_NAMES,
            len => {
                return Err(PresetError::WrongPhaseCount {
                    pattern: trimmed.to_string(),
                    len,
                })
            }
        };

        let phases = parts
            .iter()
            .zip(names)
            .map(|(part, name)| match part.parse::<u32>() {
                Ok(secs) if secs > 0 => Ok(BreathPhase::new(*name, secs)),
                _ => Err(PresetError::InvalidPhaseSeconds {
                    pattern: trimmed.to_string(),
                    value: part.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { phases })
    }

    pub fn phases(&self) -> &[BreathPhase] {
        &self.phases
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BreathPhase> {
        self.phases.get(index)
    }

    /// Seconds for one full cycle through every phase.
    pub fn cycle_secs(&self) -> u64 {
        self.phases.iter().map(|p| u64::from(p.seconds)).sum()
    }

    /// Compact `4-7-8` form.
    pub fn notation(&self) -> String {
        self.phases
            .iter()
            .map(|p| p.seconds.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}
