//! Built-in catalog: guided meditations, breathing exercises and CBT coping
//! techniques, plus mood-based recommendations.
//!
//! Turning a preset into a [`SessionConfig`] happens here, outside the
//! engine; the engine only ever sees validated seconds.

use serde::{Deserialize, Serialize};

use crate::error::PresetError;
use crate::session::{BreathingPattern, SessionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeditationSession {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Duration in minutes.
    pub duration_min: u32,
    pub category: String,
    pub difficulty: Difficulty,
    pub techniques: Vec<String>,
}

impl MeditationSession {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::timed(self.duration_min.saturating_mul(60))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingExercise {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Dash-separated seconds (`4-7-8`) or `Natural` for untimed breathing.
    pub pattern: String,
    /// Duration in minutes.
    pub duration_min: u32,
    pub benefits: Vec<String>,
}

impl BreathingExercise {
    /// Breathing session for numeric patterns, a plain timed session for
    /// free-form ones such as belly breathing.
    pub fn session_config(&self) -> Result<SessionConfig, PresetError> {
        let secs = self.duration_min.saturating_mul(60);
        match BreathingPattern::parse(&self.pattern) {
            Ok(pattern) => Ok(SessionConfig::breathing(secs, pattern)),
            Err(PresetError::Untimed(_)) => Ok(SessionConfig::timed(secs)),
            Err(e) => Err(e),
        }
    }

    fn mentions(&self, needle: &str) -> bool {
        self.benefits
            .iter()
            .any(|b| b.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopingTechnique {
    pub id: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn meditation_sessions() -> Vec<MeditationSession> {
    vec![
        MeditationSession {
            id: "1".into(),
            title: "Mindful Breathing".into(),
            description: "Focus on your breath to center yourself and reduce anxiety".into(),
            duration_min: 10,
            category: "Anxiety Relief".into(),
            difficulty: Difficulty::Beginner,
            techniques: strings(&["Breath awareness", "Present moment focus"]),
        },
        MeditationSession {
            id: "2".into(),
            title: "Body Scan Relaxation".into(),
            description: "Progressive relaxation technique to release physical tension".into(),
            duration_min: 15,
            category: "Stress Relief".into(),
            difficulty: Difficulty::Beginner,
            techniques: strings(&["Progressive muscle relaxation", "Body awareness"]),
        },
        MeditationSession {
            id: "3".into(),
            title: "Loving-Kindness Meditation".into(),
            description: "Cultivate compassion for yourself and others".into(),
            duration_min: 12,
            category: "Self-Compassion".into(),
            difficulty: Difficulty::Intermediate,
            techniques: strings(&["Loving-kindness", "Compassion cultivation"]),
        },
        MeditationSession {
            id: "4".into(),
            title: "Cognitive Restructuring".into(),
            description: "Challenge negative thought patterns with CBT techniques".into(),
            duration_min: 20,
            category: "CBT".into(),
            difficulty: Difficulty::Intermediate,
            techniques: strings(&["Thought challenging", "Cognitive reframing"]),
        },
    ]
}

pub fn breathing_exercises() -> Vec<BreathingExercise> {
    vec![
        BreathingExercise {
            id: "4-7-8".into(),
            name: "4-7-8 Breathing".into(),
            description: "Inhale for 4, hold for 7, exhale for 8 seconds".into(),
            pattern: "4-7-8".into(),
            duration_min: 5,
            benefits: strings(&["Reduces anxiety", "Promotes sleep", "Calms nervous system"]),
        },
        BreathingExercise {
            id: "box".into(),
            name: "Box Breathing".into(),
            description: "Equal counts for inhale, hold, exhale, hold".into(),
            pattern: "4-4-4-4".into(),
            duration_min: 8,
            benefits: strings(&[
                "Improves focus",
                "Reduces stress",
                "Enhances emotional regulation",
            ]),
        },
        BreathingExercise {
            id: "belly".into(),
            name: "Belly Breathing".into(),
            description: "Deep diaphragmatic breathing to activate relaxation response".into(),
            pattern: "Natural".into(),
            duration_min: 10,
            benefits: strings(&[
                "Lowers blood pressure",
                "Reduces cortisol",
                "Improves digestion",
            ]),
        },
    ]
}

pub fn coping_techniques() -> Vec<CopingTechnique> {
    vec![
        CopingTechnique {
            id: "1".into(),
            title: "Thought Record".into(),
            description: "Identify and examine negative thought patterns".into(),
            steps: strings(&[
                "Notice the negative thought",
                "Identify the emotion it creates",
                "Examine the evidence for and against",
                "Create a more balanced thought",
            ]),
        },
        CopingTechnique {
            id: "2".into(),
            title: "Grounding 5-4-3-2-1".into(),
            description: "Use your senses to stay present during anxiety".into(),
            steps: strings(&[
                "5 things you can see",
                "4 things you can touch",
                "3 things you can hear",
                "2 things you can smell",
                "1 thing you can taste",
            ]),
        },
        CopingTechnique {
            id: "3".into(),
            title: "Behavioral Activation".into(),
            description: "Schedule pleasant activities to improve mood".into(),
            steps: strings(&[
                "List activities you used to enjoy",
                "Rate them by difficulty and pleasure",
                "Schedule one small activity today",
                "Notice how you feel after completing it",
            ]),
        },
    ]
}

/// Look up a meditation by id or case-insensitive title.
pub fn find_meditation(key: &str) -> Option<MeditationSession> {
    meditation_sessions()
        .into_iter()
        .find(|m| m.id == key || m.title.eq_ignore_ascii_case(key))
}

/// Look up a breathing exercise by id, alias or case-insensitive name.
pub fn find_breathing(key: &str) -> Option<BreathingExercise> {
    let key = key.trim().to_lowercase();
    let id = match key.as_str() {
        "relaxing" | "4-7-8 breathing" => "4-7-8",
        "box-breathing" | "box breathing" | "square" => "box",
        "belly-breathing" | "belly breathing" | "natural" => "belly",
        other => other,
    };
    breathing_exercises().into_iter().find(|b| b.id == id)
}

/// Resolve a named preset (`box`, `4-7-8`, ...) or a raw pattern string
/// (`5-5-5`) into a breathing pattern.
pub fn resolve_pattern(name_or_pattern: &str) -> Result<BreathingPattern, PresetError> {
    if let Some(exercise) = find_breathing(name_or_pattern) {
        return BreathingPattern::parse(&exercise.pattern);
    }
    match BreathingPattern::parse(name_or_pattern) {
        Err(PresetError::Untimed(p)) => Err(PresetError::UnknownPreset(p)),
        other => other,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub sessions: Vec<MeditationSession>,
    pub breathing: Vec<BreathingExercise>,
    pub techniques: Vec<CopingTechnique>,
}

/// Suggestions for a self-reported mood (`anxious`, `stressed`, `sad`).
/// Any other mood gets the whole catalog.
pub fn recommendations_for(mood: &str) -> Recommendations {
    let sessions = meditation_sessions();
    let breathing = breathing_exercises();
    let techniques = coping_techniques();

    let by_category = |category: &str| -> Vec<MeditationSession> {
        sessions
            .iter()
            .filter(|s| s.category == category)
            .cloned()
            .collect()
    };
    let by_benefit = |needle: &str| -> Vec<BreathingExercise> {
        breathing.iter().filter(|b| b.mentions(needle)).cloned().collect()
    };
    let by_title = |needle: &str| -> Vec<CopingTechnique> {
        techniques
            .iter()
            .filter(|t| t.title.contains(needle))
            .cloned()
            .collect()
    };

    match mood.trim().to_lowercase().as_str() {
        "anxious" => Recommendations {
            sessions: by_category("Anxiety Relief"),
            breathing: by_benefit("anxiety"),
            techniques: by_title("Grounding"),
        },
        "stressed" => Recommendations {
            sessions: by_category("Stress Relief"),
            breathing: by_benefit("stress"),
            techniques: by_title("Behavioral"),
        },
        "sad" => Recommendations {
            sessions: by_category("Self-Compassion"),
            breathing: breathing.clone(),
            techniques: by_title("Behavioral"),
        },
        _ => Recommendations {
            sessions: sessions.clone(),
            breathing: breathing.clone(),
            techniques: techniques.clone(),
        },
    }
}

/// `m:ss` countdown rendering.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionKind;

    #[test]
    fn catalog_sizes() {
        assert_eq!(meditation_sessions().len(), 4);
        assert_eq!(breathing_exercises().len(), 3);
        assert_eq!(coping_techniques().len(), 3);
    }

    #[test]
    fn exercises_convert_to_sessions() {
        let box_cfg = find_breathing("box").unwrap().session_config().unwrap();
        assert_eq!(box_cfg.kind, SessionKind::Breathing);
        assert_eq!(box_cfg.duration_secs, 8 * 60);
        assert_eq!(box_cfg.pattern().map(|p| p.len()), Some(4));

        let belly = find_breathing("belly").unwrap().session_config().unwrap();
        assert_eq!(belly.kind, SessionKind::Timed);
        assert_eq!(belly.duration_secs, 600);
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(find_breathing("Box Breathing").unwrap().id, "box");
        assert_eq!(find_breathing("relaxing").unwrap().id, "4-7-8");
        assert_eq!(find_meditation("body scan relaxation").unwrap().id, "2");
        assert!(find_meditation("9").is_none());
    }

    #[test]
    fn resolve_pattern_accepts_names_and_raw_patterns() {
        assert_eq!(resolve_pattern("box").unwrap().notation(), "4-4-4-4");
        assert_eq!(resolve_pattern("5-5-5").unwrap().notation(), "5-5-5");
        assert_eq!(
            resolve_pattern("lotus"),
            Err(PresetError::UnknownPreset("lotus".into()))
        );
        assert!(matches!(
            resolve_pattern("belly"),
            Err(PresetError::Untimed(_))
        ));
    }

    #[test]
    fn anxious_recommendations() {
        let r = recommendations_for("anxious");
        assert_eq!(r.sessions.len(), 1);
        assert_eq!(r.sessions[0].title, "Mindful Breathing");
        assert_eq!(r.breathing.len(), 1);
        assert_eq!(r.breathing[0].id, "4-7-8");
        assert_eq!(r.techniques.len(), 1);
        assert_eq!(r.techniques[0].title, "Grounding 5-4-3-2-1");
    }

    #[test]
    fn stressed_and_sad_recommendations() {
        let stressed = recommendations_for("Stressed");
        assert_eq!(stressed.sessions[0].category, "Stress Relief");
        assert_eq!(stressed.breathing.len(), 1);
        assert_eq!(stressed.breathing[0].id, "box");
        assert_eq!(stressed.techniques[0].title, "Behavioral Activation");

        let sad = recommendations_for("sad");
        assert_eq!(sad.sessions[0].category, "Self-Compassion");
        assert_eq!(sad.breathing.len(), 3);
    }

    #[test]
    fn unknown_mood_gets_everything() {
        let r = recommendations_for("");
        assert_eq!(r.sessions.len(), 4);
        assert_eq!(r.breathing.len(), 3);
        assert_eq!(r.techniques.len(), 3);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(600), "10:00");
    }
}
