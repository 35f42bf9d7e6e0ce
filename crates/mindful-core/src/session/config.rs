use serde::{Deserialize, Serialize};

use super::pattern::BreathingPattern;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Plain countdown (meditation).
    Timed,
    /// Countdown with a cycling breathing phase machine.
    Breathing,
}

/// Immutable description of a session to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Total session length in seconds.
    pub duration_secs: u32,
    pub kind: SessionKind,
    /// Only consulted when `kind` is `Breathing`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breathing_pattern: Option<BreathingPattern>,
}

impl SessionConfig {
    pub fn timed(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            kind: SessionKind::Timed,
            breathing_pattern: None,
        }
    }

    pub fn breathing(duration_secs: u32, pattern: BreathingPattern) -> Self {
        Self {
            duration_secs,
            kind: SessionKind::Breathing,
            breathing_pattern: Some(pattern),
        }
    }

    /// The pattern that drives phase cycling, if this is a breathing session.
    pub fn pattern(&self) -> Option<&BreathingPattern> {
        match self.kind {
            SessionKind::Breathing => self.breathing_pattern.as_ref(),
            SessionKind::Timed => None,
        }
    }

    /// Check the preconditions of `start`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duration_secs == 0 {
            return Err(ValidationError::invalid_config(
                "duration_secs",
                "must be greater than 0",
            ));
        }

        if self.kind == SessionKind::Breathing {
            let pattern = self.breathing_pattern.as_ref().ok_or_else(|| {
                ValidationError::invalid_config(
                    "breathing_pattern",
                    "required for breathing sessions",
                )
            })?;

            if !matches!(pattern.len(), 3 | 4) {
                return Err(ValidationError::invalid_config(
                    "breathing_pattern",
                    format!("expected 3 or 4 phases, got {}", pattern.len()),
                ));
            }

            if let Some(i) = pattern.phases().iter().position(|p| p.seconds == 0) {
                return Err(ValidationError::invalid_config(
                    format!("breathing_pattern[{i}].phase_secs"),
                    "must be greater than 0",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::pattern::BreathPhase;

    #[test]
    fn timed_config_ignores_pattern() {
        let mut cfg = SessionConfig::timed(60);
        cfg.breathing_pattern = Some(BreathingPattern::new(vec![]));
        assert!(cfg.pattern().is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn breathing_without_pattern_is_invalid() {
        let cfg = SessionConfig {
            duration_secs: 60,
            kind: SessionKind::Breathing,
            breathing_pattern: None,
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.field(), "breathing_pattern");
    }

    #[test]
    fn zero_phase_reports_index() {
        let pattern = BreathingPattern::new(vec![
            BreathPhase::new("inhale", 4),
            BreathPhase::new("hold", 0),
            BreathPhase::new("exhale", 8),
        ]);
        let err = SessionConfig::breathing(60, pattern).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidConfig {
                field: "breathing_pattern[1].phase_secs".into(),
                message: "must be greater than 0".into(),
            }
        );
    }

    #[test]
    fn serializes_kind_lowercase() {
        let json = serde_json::to_value(SessionConfig::timed(30)).unwrap();
        assert_eq!(json["kind"], "timed");
        assert!(json.get("breathing_pattern").is_none());
    }
}
