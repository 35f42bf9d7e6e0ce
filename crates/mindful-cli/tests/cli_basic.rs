//! Basic CLI E2E tests.
//!
//! Tests invoke the built `mindful` binary against a throwaway config
//! directory and verify its outputs.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with an isolated config directory.
fn mindful(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mindful").unwrap();
    cmd.env("MINDFUL_CONFIG_DIR", dir.path())
        .env_remove("MINDFUL_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("CLI should print JSON")
}

#[test]
fn test_simulate_box_breathing_cycle() {
    let dir = TempDir::new().unwrap();
    let json = json_output(mindful(&dir).args(["session", "simulate", "box", "--seconds", "16"]));
    let snap = &json["snapshot"];
    assert_eq!(snap["type"], "StateSnapshot");
    assert_eq!(snap["remaining_secs"], 0);
    assert_eq!(snap["is_running"], false);
    assert_eq!(snap["completed_cycles"], 1);
    assert_eq!(snap["phase_index"], 0);
}

#[test]
fn test_simulate_partial_ticks() {
    let dir = TempDir::new().unwrap();
    let json = json_output(mindful(&dir).args([
        "session", "simulate", "4-7-8", "--seconds", "60", "--ticks", "11",
    ]));
    let snap = &json["snapshot"];
    assert_eq!(snap["remaining_secs"], 49);
    assert_eq!(snap["is_running"], true);
    assert_eq!(snap["phase_name"], "exhale");
    assert_eq!(snap["phase_remaining_secs"], 8);
}

#[test]
fn test_simulate_with_events() {
    let dir = TempDir::new().unwrap();
    let json = json_output(mindful(&dir).args([
        "session", "simulate", "timed", "--seconds", "3", "--events",
    ]));
    let events = json["events"].as_array().unwrap();
    assert_eq!(events.first().unwrap()["type"], "SessionStarted");
    assert_eq!(events.last().unwrap()["type"], "SessionCompleted");
    assert_eq!(events.len(), 2);
}

#[test]
fn test_simulate_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    mindful(&dir)
        .args(["session", "simulate", "timed", "--seconds", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duration_secs"));

    mindful(&dir)
        .args(["session", "simulate", "4-4", "--seconds", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 3 or 4"));
}

#[test]
fn test_live_breathing_session() {
    let dir = TempDir::new().unwrap();
    mindful(&dir)
        .args(["session", "breathe", "4-7-8", "--seconds", "19", "--tick-ms", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Breathing 4-7-8"))
        .stdout(predicate::str::contains("hold (7s)"))
        .stdout(predicate::str::contains("Cycle 1 complete"))
        .stdout(predicate::str::contains("Session complete after 1 cycle(s)"));
}

#[test]
fn test_live_meditation_json_events() {
    let dir = TempDir::new().unwrap();
    let output = mindful(&dir)
        .args(["session", "meditate", "--minutes", "1", "--tick-ms", "1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let lines: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["type"], "SessionStarted");
    assert_eq!(lines[0]["duration_secs"], 60);
    assert_eq!(lines[1]["type"], "SessionCompleted");
}

#[test]
fn test_live_meditation_counts_down_minutes() {
    let dir = TempDir::new().unwrap();
    mindful(&dir)
        .args(["session", "meditate", "--minutes", "2", "--tick-ms", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Meditation for 2:00"))
        .stdout(predicate::str::contains("1:00 remaining"))
        .stdout(predicate::str::contains("Session complete"));
}

#[test]
fn test_meditate_catalog_entry_with_minutes() {
    let dir = TempDir::new().unwrap();
    let output = mindful(&dir)
        .args(["session", "meditate", "2", "--minutes", "1", "--tick-ms", "1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let first: serde_json::Value =
        serde_json::from_str(String::from_utf8(output).unwrap().lines().next().unwrap()).unwrap();
    assert_eq!(first["type"], "SessionStarted");
    assert_eq!(first["duration_secs"], 60);
}

#[test]
fn test_unknown_meditation_fails() {
    let dir = TempDir::new().unwrap();
    mindful(&dir)
        .args(["session", "meditate", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown meditation"));
}

#[test]
fn test_catalog_breathing_json() {
    let dir = TempDir::new().unwrap();
    let json = json_output(mindful(&dir).args(["catalog", "breathing", "--json"]));
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["4-7-8", "box", "belly"]);
}

#[test]
fn test_recommend_anxious() {
    let dir = TempDir::new().unwrap();
    mindful(&dir)
        .args(["recommend", "anxious"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mindful Breathing"))
        .stdout(predicate::str::contains("Grounding 5-4-3-2-1"))
        .stdout(predicate::str::contains("Box Breathing").not());
}

#[test]
fn test_insights_from_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("moods.json");
    let entries: Vec<serde_json::Value> = (0..8)
        .map(|i| serde_json::json!({ "date": format!("2024-01-{:02}", i + 7), "mood": 2 }))
        .collect();
    std::fs::write(&file, serde_json::to_string(&entries).unwrap()).unwrap();

    let json = json_output(mindful(&dir).args(["insights", "--json", "--file"]).arg(&file));
    assert_eq!(json["insights"][0]["pattern"], "Consistently Low Mood");
    assert_eq!(json["stats"]["average"], 2.0);
    assert_eq!(json["stats"]["lowest"], 2);
    assert_eq!(json["stats"]["positive_streak"], 0);
}

#[test]
fn test_insights_text_prints_stats() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("moods.json");
    let entries = serde_json::json!([
        { "date": "2024-01-07", "mood": 2 },
        { "date": "2024-01-08", "mood": 4 },
        { "date": "2024-01-09", "mood": 5 },
    ]);
    std::fs::write(&file, entries.to_string()).unwrap();

    mindful(&dir)
        .args(["insights", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Average 3.7 (high 5, low 2), positive streak 2 day(s)",
        ))
        .stdout(predicate::str::contains("No patterns found in 3 entries."));
}

#[test]
fn test_insights_demo_rejects_out_of_range_days() {
    let dir = TempDir::new().unwrap();
    mindful(&dir)
        .args(["insights", "--demo", "--days", "98000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--days"));
}

#[test]
fn test_insights_demo_runs() {
    let dir = TempDir::new().unwrap();
    mindful(&dir)
        .args(["insights", "--demo", "--seed", "42"])
        .assert()
        .success();
}

#[test]
fn test_config_set_get_roundtrip() {
    let dir = TempDir::new().unwrap();
    mindful(&dir)
        .args(["config", "set", "breathing.default_preset", "4-7-8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
    mindful(&dir)
        .args(["config", "get", "breathing.default_preset"])
        .assert()
        .success()
        .stdout("4-7-8\n");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    mindful(&dir)
        .args(["config", "set", "display.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
}
