mod helpers;

use helpers::{clear_env, gridiron, set_env};
use serde_json::Value;
use serial_test::serial;

fn cfg_json() -> Value {
    let res = gridiron(&["cfg"]);
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    serde_json::from_str(&res.stdout).unwrap()
}

#[test]
#[serial]
fn defaults_are_reported_as_default() {
    clear_env();
    let json = cfg_json();
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["plays"]["value"].as_u64(), Some(60));
    for key in ["seed", "plays", "tuning"] {
        assert_eq!(json[key]["source"].as_str(), Some("default"), "{}", key);
    }
    assert_eq!(
        json["tuning"]["value"]["field_goals"]["hold_depth"].as_i64(),
        Some(7)
    );
}

#[test]
#[serial]
fn env_overrides_the_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gridiron.toml");
    std::fs::write(
        &path,
        "seed = 456\nplays = 30\n\n[tuning.penalties]\nfrequency_scale = 0.5\n",
    )
    .unwrap();
    set_env("GRIDIRON_CONFIG", &path);

    let json = cfg_json();
    assert_eq!(json["seed"]["value"].as_u64(), Some(456));
    assert_eq!(json["seed"]["source"].as_str(), Some("file"));
    assert_eq!(json["plays"]["source"].as_str(), Some("file"));
    assert_eq!(json["tuning"]["source"].as_str(), Some("file"));
    assert_eq!(
        json["tuning"]["value"]["penalties"]["frequency_scale"].as_f64(),
        Some(0.5)
    );

    set_env("GRIDIRON_SEED", "789");
    let json = cfg_json();
    assert_eq!(json["seed"]["value"].as_u64(), Some(789));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["plays"]["value"].as_u64(), Some(30));
    clear_env();
}

#[test]
#[serial]
fn env_plays_drive_the_default_sim_length() {
    clear_env();
    set_env("GRIDIRON_PLAYS", "7");
    let res = gridiron(&["sim", "--seed", "1"]);
    assert_eq!(res.code, 0);
    assert!(res.stdout.contains("after 7 plays"));
    clear_env();
}

#[test]
#[serial]
fn bad_env_seed_is_a_config_error() {
    clear_env();
    set_env("GRIDIRON_SEED", "not-a-number");
    let res = gridiron(&["cfg"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Invalid configuration: Invalid seed"));
    clear_env();
}

#[test]
#[serial]
fn malformed_file_is_a_config_error() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "plays = \"many\"\n").unwrap();
    set_env("GRIDIRON_CONFIG", &path);
    let res = gridiron(&["sim", "--plays", "3"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("cannot parse config file"));
    clear_env();
}
