//! Mood insight heuristics.
//!
//! Formulaic pattern detection over a daily mood series: a 7-entry window
//! average, the first-to-last trend of that window, and the weakest weekday
//! of the last two weeks. Also generates mock mood series for demos.

use chrono::{Datelike, Days, NaiveDate};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

/// Number of most recent entries used for the average and trend.
pub const RECENT_WINDOW: usize = 7;
/// Number of most recent entries used for the weekday pattern.
pub const WEEKDAY_WINDOW: usize = 14;
/// Number of most recent entries summarized by [`stats`].
pub const STATS_WINDOW: usize = 30;
/// Lowest mood counted towards a positive streak.
pub const POSITIVE_MOOD: u8 = 4;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodLevel {
    VeryLow = 1,
    Low = 2,
    Neutral = 3,
    Good = 4,
    Excellent = 5,
}

impl MoodLevel {
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(MoodLevel::VeryLow),
            2 => Some(MoodLevel::Low),
            3 => Some(MoodLevel::Neutral),
            4 => Some(MoodLevel::Good),
            5 => Some(MoodLevel::Excellent),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodLevel::VeryLow => "Very Low",
            MoodLevel::Low => "Low",
            MoodLevel::Neutral => "Neutral",
            MoodLevel::Good => "Good",
            MoodLevel::Excellent => "Excellent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    /// 1 (very low) ..= 5 (excellent).
    pub mood: u8,
    #[serde(default)]
    pub note: String,
}

impl MoodEntry {
    pub fn level(&self) -> Option<MoodLevel> {
        MoodLevel::from_value(self.mood)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodInsight {
    pub pattern: String,
    pub suggestion: String,
    /// Fixed confidence percentage attached to each heuristic.
    pub confidence: u8,
}

impl MoodInsight {
    fn new(pattern: impl Into<String>, suggestion: impl Into<String>, confidence: u8) -> Self {
        Self {
            pattern: pattern.into(),
            suggestion: suggestion.into(),
            confidence,
        }
    }
}

/// Summary figures for a mood series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodStats {
    /// Mean of the last [`STATS_WINDOW`] moods.
    pub average: f64,
    pub highest: u8,
    pub lowest: u8,
    /// Consecutive entries at or above [`POSITIVE_MOOD`], counted back from the newest.
    pub positive_streak: u32,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Derive insights from entries ordered oldest first.
///
/// Needs more than [`RECENT_WINDOW`] entries; returns nothing otherwise.
pub fn analyze(entries: &[MoodEntry]) -> Vec<MoodInsight> {
    let mut insights = Vec::new();
    if entries.len() <= RECENT_WINDOW {
        return insights;
    }

    let recent: Vec<f64> = entries[entries.len() - RECENT_WINDOW..]
        .iter()
        .map(|e| f64::from(e.mood))
        .collect();
    let average = mean(&recent);
    let trend = recent[recent.len() - 1] - recent[0];

    if average < 2.5 {
        insights.push(MoodInsight::new(
            "Consistently Low Mood",
            "Consider reaching out to a mental health professional for additional support.",
            85,
        ));
    } else if average > 4.0 {
        insights.push(MoodInsight::new(
            "Positive Mood Trend",
            "Great job maintaining positive mental health! Keep up your current routines.",
            90,
        ));
    }

    if trend > 1.0 {
        insights.push(MoodInsight::new(
            "Improving Trend",
            "Your mood has been improving recently. Reflect on what positive changes you've made.",
            78,
        ));
    } else if trend < -1.0 {
        insights.push(MoodInsight::new(
            "Declining Trend",
            "Your mood has been declining. Consider practicing self-care or talking to someone.",
            82,
        ));
    }

    let mut by_weekday: [Vec<f64>; 7] = Default::default();
    let start = entries.len().saturating_sub(WEEKDAY_WINDOW);
    for entry in &entries[start..] {
        let day = entry.date.weekday().num_days_from_sunday() as usize;
        by_weekday[day].push(f64::from(entry.mood));
    }

    // First weekday holding the lowest non-empty average.
    let lowest = by_weekday
        .iter()
        .enumerate()
        .filter(|(_, moods)| !moods.is_empty())
        .map(|(day, moods)| (day, mean(moods)))
        .fold(None::<(usize, f64)>, |best, (day, avg)| match best {
            Some((_, best_avg)) if best_avg <= avg => best,
            _ => Some((day, avg)),
        });

    if let Some((day, day_avg)) = lowest {
        if day_avg < average - 0.5 {
            let name = DAY_NAMES[day];
            insights.push(MoodInsight::new(
                format!("{name} Pattern"),
                format!("You tend to feel lower on {name}s. Plan something positive for these days."),
                72,
            ));
        }
    }

    insights
}

/// Summarize entries ordered oldest first. An empty series gives all zeros.
pub fn stats(entries: &[MoodEntry]) -> MoodStats {
    let start = entries.len().saturating_sub(STATS_WINDOW);
    let recent = &entries[start..];
    let (Some(highest), Some(lowest)) = (
        recent.iter().map(|e| e.mood).max(),
        recent.iter().map(|e| e.mood).min(),
    ) else {
        return MoodStats::default();
    };

    let moods: Vec<f64> = recent.iter().map(|e| f64::from(e.mood)).collect();
    let positive_streak = entries
        .iter()
        .rev()
        .take_while(|e| e.mood >= POSITIVE_MOOD)
        .count();

    MoodStats {
        average: mean(&moods),
        highest,
        lowest,
        positive_streak: u32::try_from(positive_streak).unwrap_or(u32::MAX),
    }
}

/// Generate `days` mock entries ending at `today`, oldest first.
///
/// The series follows a slow sine wave around neutral with a little noise.
/// Pass a seed for reproducible output. Days that fall before the earliest
/// representable date are left out.
pub fn sample_entries(days: u32, seed: Option<u64>, today: NaiveDate) -> Vec<MoodEntry> {
    let mut rng = match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    };

    (0..days)
        .rev()
        .filter_map(|i| {
            let date = today.checked_sub_days(Days::new(u64::from(i)))?;
            let noise = (rng.gen::<f64>() - 0.5) * 0.8;
            let raw = 3.0 + (f64::from(i) * 0.2).sin() * 1.5 + noise;
            let mood = raw.round().clamp(1.0, 5.0) as u8;
            Some(MoodEntry {
                date,
                mood,
                note: if i % 3 == 0 {
                    "Had a good day with friends".to_string()
                } else {
                    String::new()
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Entries for consecutive days starting on Sunday 2024-01-07.
    fn series(moods: &[u8]) -> Vec<MoodEntry> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        moods
            .iter()
            .enumerate()
            .map(|(i, &mood)| MoodEntry {
                date: start + chrono::Duration::days(i as i64),
                mood,
                note: String::new(),
            })
            .collect()
    }

    fn patterns(insights: &[MoodInsight]) -> Vec<&str> {
        insights.iter().map(|i| i.pattern.as_str()).collect()
    }

    #[test]
    fn too_few_entries_yield_nothing() {
        assert!(analyze(&series(&[1, 1, 1, 1, 1, 1, 1])).is_empty());
    }

    #[test]
    fn low_average_is_flagged() {
        let insights = analyze(&series(&[2, 2, 2, 2, 2, 2, 2, 2]));
        assert_eq!(patterns(&insights), ["Consistently Low Mood"]);
        assert_eq!(insights[0].confidence, 85);
    }

    #[test]
    fn high_average_and_improving_trend() {
        let insights = analyze(&series(&[1, 3, 4, 4, 5, 5, 5, 5]));
        let p = patterns(&insights);
        assert!(p.contains(&"Positive Mood Trend"));
        assert!(p.contains(&"Improving Trend"));
    }

    #[test]
    fn declining_trend() {
        let insights = analyze(&series(&[3, 5, 4, 3, 3, 3, 3, 2]));
        assert!(patterns(&insights).contains(&"Declining Trend"));
    }

    #[test]
    fn weekday_pattern_detected() {
        // Two weeks starting Sunday; every Wednesday is a 1, everything else 4.
        let moods: Vec<u8> = (0..14).map(|i| if i % 7 == 3 { 1 } else { 4 }).collect();
        let insights = analyze(&series(&moods));
        let weekday = insights
            .iter()
            .find(|i| i.pattern == "Wednesday Pattern")
            .expect("Wednesday pattern");
        assert_eq!(weekday.confidence, 72);
        assert!(weekday.suggestion.contains("Wednesdays"));
    }

    #[test]
    fn flat_series_has_no_weekday_pattern() {
        let insights = analyze(&series(&[3; 14]));
        assert!(insights.is_empty());
    }

    #[test]
    fn sample_entries_are_seeded_and_bounded() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let a = sample_entries(30, Some(7), today);
        let b = sample_entries(30, Some(7), today);
        assert_eq!(a, b);
        assert_eq!(a.len(), 30);
        assert_eq!(a.last().map(|e| e.date), Some(today));
        assert!(a.windows(2).all(|w| w[0].date < w[1].date));
        assert!(a.iter().all(|e| e.level().is_some()));
    }

    #[test]
    fn sample_entries_stop_at_earliest_date() {
        let today = NaiveDate::MIN + Days::new(2);
        let entries = sample_entries(5, Some(1), today);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries.first().map(|e| e.date), Some(NaiveDate::MIN));
        assert_eq!(entries.last().map(|e| e.date), Some(today));
    }

    #[test]
    fn stats_of_empty_series_are_zero() {
        assert_eq!(stats(&[]), MoodStats::default());
        let empty = stats(&[]);
        assert_eq!(empty.average, 0.0);
        assert_eq!((empty.highest, empty.lowest, empty.positive_streak), (0, 0, 0));
    }

    #[test]
    fn stats_all_high_series_streaks_through() {
        let s = stats(&series(&[4, 5, 5, 4]));
        assert_eq!(s.average, 4.5);
        assert_eq!((s.highest, s.lowest), (5, 4));
        assert_eq!(s.positive_streak, 4);
    }

    #[test]
    fn stats_streak_breaks_on_low_mood() {
        let s = stats(&series(&[5, 5, 3, 4, 5]));
        assert_eq!(s.positive_streak, 2);
        assert_eq!((s.highest, s.lowest), (5, 3));

        let s = stats(&series(&[5, 5, 2]));
        assert_eq!(s.positive_streak, 0);
    }

    #[test]
    fn stats_window_covers_last_thirty_entries() {
        // The single 1 falls outside the window; the streak still spans everything.
        let mut moods = vec![1];
        moods.extend([4; 30]);
        let s = stats(&series(&moods));
        assert_eq!(s.lowest, 4);
        assert_eq!(s.average, 4.0);
        assert_eq!(s.positive_streak, 30);
    }

    #[test]
    fn mood_level_labels() {
        assert_eq!(MoodLevel::from_value(1).map(MoodLevel::label), Some("Very Low"));
        assert_eq!(MoodLevel::from_value(5).map(MoodLevel::label), Some("Excellent"));
        assert!(MoodLevel::from_value(0).is_none());
    }
}
