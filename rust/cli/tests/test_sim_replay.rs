mod helpers;

use gridiron_engine::logger::PlayRecord;
use gridiron_engine::replay::ReplayLog;
use helpers::{clear_env, gridiron};
use serial_test::serial;

fn record(dir: &std::path::Path, plays: &str, seed: &str) -> String {
    let log = dir.join("game.replay.json");
    let log = log.to_string_lossy().into_owned();
    let res = gridiron(&["sim", "--plays", plays, "--seed", seed, "--record", &log]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Replay log: "));
    log
}

#[test]
#[serial]
fn recorded_sim_replays_to_the_last_draw() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let log = record(dir.path(), "40", "2024");

    let res = gridiron(&["replay", "--log", &log]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("replay verified: 40 plays"));

    // same narrative both ways
    let sim = gridiron(&["sim", "--plays", "40", "--seed", "2024"]);
    let body = |s: &str| {
        s.lines()
            .filter(|l| l.starts_with(' '))
            .map(str::to_string)
            .collect::<Vec<_>>()
    };
    assert_eq!(body(&sim.stdout), body(&res.stdout));
}

#[test]
#[serial]
fn partial_replay_warns_about_unread_draws() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let log = record(dir.path(), "20", "5");

    let res = gridiron(&["replay", "--log", &log, "--plays", "10"]);
    assert_eq!(res.code, 0);
    assert!(res.stdout.contains("replay matched 10 plays"));
    assert!(res.stderr.contains("WARNING: replay stopped with unread draws"));
}

#[test]
#[serial]
fn truncated_log_fails_with_exit_2() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let log = record(dir.path(), "30", "77");

    let mut broken = ReplayLog::load(&log).unwrap();
    broken.doubles.truncate(broken.doubles.len() / 2);
    broken.save(&log).unwrap();

    let res = gridiron(&["replay", "--log", &log]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("replay diverged at play"));
    assert!(res.stderr.contains("Replay log exhausted"));
}

#[test]
#[serial]
fn missing_log_is_an_error() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let res = gridiron(&["replay", "--log", &missing.to_string_lossy()]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Failed to read"));
}

#[test]
#[serial]
fn output_writes_one_record_per_play() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("plays.jsonl");
    let path_str = path.to_string_lossy().into_owned();
    let res = gridiron(&["sim", "--plays", "15", "--seed", "8", "--output", &path_str]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);

    let content = std::fs::read_to_string(&path).unwrap();
    let records: Vec<PlayRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 15);
    assert!(records.iter().all(|r| r.seed == Some(8)));
    assert!(records[14].play_id.ends_with("-000015"));
}
