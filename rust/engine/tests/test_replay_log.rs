mod common;

use common::Driver;
use gridiron_engine::errors::{ReplayStream, SimError};
use gridiron_engine::replay::{IntRangeEntry, ReplayLog, ReplayRandom};
use gridiron_engine::rng::RandomSource;
use gridiron_engine::tuning::Tuning;

const PLAYS: usize = 40;

fn record_run(seed: u64) -> (Vec<gridiron_engine::play::Play>, ReplayLog) {
    let mut rng = ReplayRandom::record(seed);
    let mut driver = Driver::new(Tuning::default());
    let plays = (0..PLAYS)
        .map(|_| driver.step(&mut rng).expect("recorded play"))
        .collect();
    (plays, rng.into_log())
}

#[test]
fn replayed_game_matches_the_recording() {
    let (recorded, log) = record_run(2024);
    assert!(log.draw_count() > PLAYS);

    let mut rng = ReplayRandom::replay(log);
    let mut driver = Driver::new(Tuning::default());
    for (i, expected) in recorded.iter().enumerate() {
        let play = driver.step(&mut rng).expect("replayed play");
        assert_eq!(&play, expected, "play {i} diverged");
    }
    assert!(rng.is_fully_consumed());
}

#[test]
fn log_survives_a_trip_through_disk() {
    let (recorded, log) = record_run(99);
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("logs").join("replay.json");
    log.save(&path).expect("save");

    let loaded = ReplayLog::load(&path).expect("load");
    assert_eq!(loaded, log);

    let mut rng = ReplayRandom::replay(loaded);
    let mut driver = Driver::new(Tuning::default());
    let replayed: Vec<_> = (0..PLAYS)
        .map(|_| driver.step(&mut rng).expect("replayed play"))
        .collect();
    assert_eq!(replayed, recorded);
}

#[test]
fn persisted_keys_are_camel_case() {
    let mut log = ReplayLog::new(5);
    log.doubles.push(0.25);
    log.int_ranges.push(IntRangeEntry {
        min: 1,
        max: 4,
        value: 2,
    });
    let json = log.to_json().expect("json");
    assert!(json.contains("\"intRanges\""));
    assert!(json.contains("\"seed\":5"));
    assert_eq!(ReplayLog::from_json(&json).expect("parse"), log);
}

#[test]
fn doubles_survive_serialization_bit_for_bit() {
    let mut rng = ReplayRandom::record(31337);
    for _ in 0..64 {
        rng.next_double().expect("draw");
    }
    let log = rng.into_log();
    let back = ReplayLog::from_json(&log.to_json().expect("json")).expect("parse");
    for (a, b) in log.doubles.iter().zip(&back.doubles) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn malformed_log_fails_to_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"seed": 1, "doubles": [0.5, "x"]}"#).expect("write");
    let err = ReplayLog::load(&path).unwrap_err();
    assert!(matches!(err, SimError::Serde(_)));
}

#[test]
fn empty_stream_reports_which_one_ran_out() {
    let mut rng = ReplayRandom::replay(ReplayLog::new(0));
    let err = rng.next_double().unwrap_err();
    assert!(matches!(
        err,
        SimError::ReplayExhausted {
            stream: ReplayStream::Doubles
        }
    ));
    assert_eq!(err.to_string(), "Replay log exhausted: Doubles");
    let err = rng.next_below(3).unwrap_err();
    assert_eq!(err.to_string(), "Replay log exhausted: Ints");
}

#[test]
fn range_bounds_must_match_the_recording() {
    let mut log = ReplayLog::new(0);
    log.int_ranges.push(IntRangeEntry {
        min: 8,
        max: 20,
        value: 12,
    });
    let mut rng = ReplayRandom::replay(log);
    let err = rng.next_range(3, 12).unwrap_err();
    assert!(matches!(err, SimError::ReplayMismatch { .. }));
    assert!(err.is_replay_divergence());
    // a failed mismatch does not consume the entry
    assert_eq!(rng.next_range(8, 20).expect("matching call"), 12);
}

#[test]
fn truncated_log_stops_the_game_with_a_divergence() {
    let (_, mut log) = record_run(7);
    log.doubles.truncate(log.doubles.len() / 2);
    let mut rng = ReplayRandom::replay(log);
    let mut driver = Driver::new(Tuning::default());
    let err = (0..PLAYS)
        .map(|_| driver.step(&mut rng))
        .find_map(Result::err)
        .expect("replay should run dry");
    assert!(err.is_replay_divergence());
}

#[test]
fn recording_mode_reports_nothing_remaining() {
    let mut rng = ReplayRandom::record(1);
    rng.next_int().expect("draw");
    assert!(!rng.is_replaying());
    assert_eq!(rng.remaining(), (0, 0, 0));
    assert_eq!(rng.log().ints.len(), 1);
}

#[test]
fn bounded_ints_must_fit_the_requested_bound() {
    let mut log = ReplayLog::new(0);
    log.ints = vec![i32::MAX, 3, 0];
    let mut rng = ReplayRandom::replay(log);
    let err = rng.next_below(9).unwrap_err();
    assert!(matches!(
        err,
        SimError::ReplayOutOfBounds {
            max: 9,
            value: i32::MAX
        }
    ));
    assert!(err.is_replay_divergence());
    // the offending entry is not consumed, an unbounded read still gets it
    assert_eq!(rng.next_int().expect("raw int"), i32::MAX);
    assert!(rng.next_below(0).is_err());
    assert_eq!(rng.next_below(4).expect("in bounds"), 3);
    assert_eq!(rng.next_below(0).expect("zero bound"), 0);
    assert!(matches!(
        rng.next_below(-1).unwrap_err(),
        SimError::InvalidRange { min: 0, max: -1 }
    ));
}
