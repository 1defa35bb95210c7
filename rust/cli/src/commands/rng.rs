//! Random source inspection command.
//!
//! Prints the first draws of the engine's seeded source so two machines can
//! confirm they produce the same sequence for a seed.

use crate::error::CliError;
use gridiron_engine::rng::{DeterministicRandom, RandomSource};
use std::io::Write;

/// Print five doubles and five ints drawn from `seed` (random when absent).
pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = DeterministicRandom::from_seed(s);
    let mut doubles = Vec::with_capacity(5);
    for _ in 0..5 {
        doubles.push(rng.next_double()?);
    }
    let mut ints = Vec::with_capacity(5);
    for _ in 0..5 {
        ints.push(rng.next_int()?);
    }
    writeln!(out, "RNG sample (seed {}): {:?}", s, doubles)?;
    writeln!(out, "ints: {:?}", ints)?;
    Ok(())
}
