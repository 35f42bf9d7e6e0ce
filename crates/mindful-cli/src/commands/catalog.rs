use clap::Subcommand;
use mindful_core::presets::{self, BreathingExercise, CopingTechnique, MeditationSession};
use mindful_core::recommendations_for;

#[derive(Subcommand, Clone, Copy)]
pub enum CatalogAction {
    /// Guided meditations
    Meditations,
    /// Breathing exercises
    Breathing,
    /// CBT coping techniques
    Techniques,
}

fn print_meditations(items: &[MeditationSession]) {
    println!("Meditations:");
    for m in items {
        println!(
            "  [{}] {} ({} min, {}) - {}",
            m.id, m.title, m.duration_min, m.category, m.description
        );
    }
}

fn print_breathing(items: &[BreathingExercise]) {
    println!("Breathing exercises:");
    for b in items {
        println!(
            "  [{}] {} ({}, {} min) - {}",
            b.id, b.name, b.pattern, b.duration_min, b.description
        );
    }
}

fn print_techniques(items: &[CopingTechnique]) {
    println!("Coping techniques:");
    for t in items {
        println!("  {} - {}", t.title, t.description);
        for (i, step) in t.steps.iter().enumerate() {
            println!("    {}. {step}", i + 1);
        }
    }
}

pub fn run(action: Option<CatalogAction>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        Some(CatalogAction::Meditations) => {
            let items = presets::meditation_sessions();
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print_meditations(&items);
            }
        }
        Some(CatalogAction::Breathing) => {
            let items = presets::breathing_exercises();
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print_breathing(&items);
            }
        }
        Some(CatalogAction::Techniques) => {
            let items = presets::coping_techniques();
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print_techniques(&items);
            }
        }
        None => recommend("", json)?,
    }
    Ok(())
}

pub fn recommend(mood: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let recs = recommendations_for(mood);
    if json {
        println!("{}", serde_json::to_string_pretty(&recs)?);
    } else {
        print_meditations(&recs.sessions);
        print_breathing(&recs.breathing);
        print_techniques(&recs.techniques);
    }
    Ok(())
}
