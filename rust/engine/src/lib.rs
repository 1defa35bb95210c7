//! # gridiron-engine: Stochastic Play Resolution
//!
//! A deterministic American-football play engine. Player ratings become
//! probabilities and yardage through small composable checks and results,
//! chained into one pipeline per play kind. Every draw goes through a seeded,
//! recordable random source so a simulation can be replayed draw for draw.
//!
//! ## Core Modules
//!
//! - [`rng`] - Seeded random source (ChaCha20) and the [`rng::RandomSource`] trait
//! - [`replay`] - Record/replay wrapper and the persisted [`replay::ReplayLog`]
//! - [`checks`] - Probability checks (protection, completion, fumbles, penalties, ...)
//! - [`results`] - Magnitude results (run yards, air yards, returns, injuries, ...)
//! - [`plays`] - Per-kind pipelines: run, pass, kickoff, punt, field goal
//! - [`play_result`] - Scoring, possession and down/distance after a play
//! - [`enforcement`] - Penalty acceptance and enforcement
//! - [`game`] / [`play`] / [`player`] - Situation, play records and rosters
//! - [`tuning`] - Every named probability constant, overridable through serde
//! - [`logger`] - JSONL play log
//! - [`errors`] - Error types for replay and play resolution
//!
//! ## Deterministic Draws
//!
//! ```rust
//! use gridiron_engine::rng::{DeterministicRandom, RandomSource};
//!
//! let mut a = DeterministicRandom::from_seed(42);
//! let mut b = DeterministicRandom::from_seed(42);
//! assert_eq!(a.next_double().unwrap(), b.next_double().unwrap());
//! assert_eq!(a.next_range(3, 9).unwrap(), b.next_range(3, 9).unwrap());
//! ```
//!
//! ## Record and Replay
//!
//! ```rust
//! use gridiron_engine::checks::{FlatCheck, SkillsCheck};
//! use gridiron_engine::replay::ReplayRandom;
//! use gridiron_engine::tuning::Tuning;
//!
//! let t = Tuning::default();
//! let check = FlatCheck::new("coin", 0.5);
//!
//! let mut recorder = ReplayRandom::record(7);
//! let first = check.execute(&mut recorder, &t).unwrap();
//!
//! let mut replayer = ReplayRandom::replay(recorder.into_log());
//! let again = check.execute(&mut replayer, &t).unwrap();
//! assert_eq!(first.occurred, again.occurred);
//! assert!(replayer.is_fully_consumed());
//! ```

pub mod checks;
pub mod enforcement;
pub mod errors;
pub mod game;
pub mod injury;
pub mod logger;
pub mod penalty;
pub mod play;
pub mod play_result;
pub mod player;
pub mod plays;
pub mod replay;
pub mod results;
pub mod rng;
pub mod tuning;
