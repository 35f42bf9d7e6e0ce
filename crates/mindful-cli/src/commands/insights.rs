use std::path::PathBuf;

use chrono::Local;
use mindful_core::{analyze, sample_entries, stats, MoodEntry};

#[derive(clap::Args)]
pub struct InsightsArgs {
    /// JSON file holding an array of mood entries (oldest first)
    #[arg(long, conflicts_with = "demo")]
    file: Option<PathBuf>,
    /// Analyze generated sample data instead of a file
    #[arg(long)]
    demo: bool,
    /// Days of sample data (at most ten years)
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..=3650))]
    days: u32,
    /// Seed for reproducible sample data
    #[arg(long)]
    seed: Option<u64>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: InsightsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut entries: Vec<MoodEntry> = match (&args.file, args.demo) {
        (Some(path), _) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        (None, true) => sample_entries(args.days, args.seed, Local::now().date_naive()),
        (None, false) => return Err("pass --file <entries.json> or --demo".into()),
    };
    entries.sort_by_key(|e| e.date);

    if let Some(bad) = entries.iter().find(|e| e.level().is_none()) {
        return Err(format!("mood on {} must be between 1 and 5, got {}", bad.date, bad.mood).into());
    }

    let summary = stats(&entries);
    let insights = analyze(&entries);
    if args.json {
        let output = serde_json::json!({ "stats": summary, "insights": insights });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !entries.is_empty() {
        println!(
            "Average {:.1} (high {}, low {}), positive streak {} day(s)",
            summary.average, summary.highest, summary.lowest, summary.positive_streak
        );
    }
    if insights.is_empty() {
        println!("No patterns found in {} entries.", entries.len());
    }
    for insight in &insights {
        println!("{} ({}%)", insight.pattern, insight.confidence);
        println!("  {}", insight.suggestion);
    }
    Ok(())
}
