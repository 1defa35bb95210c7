//! Simulation command handler.
//!
//! Runs the fixed play-calling table against the built-in rosters, printing
//! each play's summary and commentary. Every draw goes through a recording
//! source, so `--record` can persist the replay log without changing what is
//! simulated.

use crate::config;
use crate::drive::Driver;
use crate::error::CliError;
use crate::ui;
use gridiron_engine::logger::{PlayLogger, PlayRecord};
use gridiron_engine::replay::ReplayRandom;
use std::io::Write;
use tracing::info;

pub fn handle_sim_command(
    plays: Option<u32>,
    seed: Option<u64>,
    record: Option<String>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources().map_err(|e| {
        let _ = ui::write_error(err, &format!("Invalid configuration: {}", e));
        CliError::from(e)
    })?;
    let cfg = resolved.config;

    let total = plays.unwrap_or(cfg.plays);
    if let Err(e) = config::validate_plays(total) {
        ui::write_error(err, &e.to_string())?;
        return Err(CliError::InvalidInput(e.to_string()));
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut logger = match &output {
        Some(path) => Some(PlayLogger::create(path).map_err(|e| {
            let _ = ui::write_error(err, &format!("Failed to create {}: {}", path, e));
            CliError::Io(e)
        })?),
        None => None,
    };

    info!(seed, plays = total, "starting simulation");
    writeln!(out, "Simulating {} plays (seed {})", total, seed)?;

    let mut rng = ReplayRandom::record(seed);
    let mut driver = Driver::new(cfg.tuning);
    for n in 1..=total {
        let play = driver.step(&mut rng).map_err(|e| {
            let _ = ui::write_error(err, &format!("play {} failed: {}", n, e));
            CliError::from(e)
        })?;
        ui::write_play(out, n, &play)?;
        if let Some(lg) = logger.as_mut() {
            let rec = PlayRecord::new(lg.next_id(), Some(seed), &play, &driver.game);
            lg.write(&rec)?;
        }
    }
    ui::write_score(out, &driver.game)?;

    if let Some(path) = record {
        let log = rng.into_log();
        log.save(&path).map_err(|e| {
            let _ = ui::write_error(err, &format!("Failed to write {}: {}", path, e));
            CliError::from(e)
        })?;
        info!(path = %path, draws = log.draw_count(), "replay log saved");
        writeln!(out, "Replay log: {} ({} draws)", path, log.draw_count())?;
    }
    if let Some(path) = output {
        writeln!(out, "Play log: {}", path)?;
    }
    Ok(())
}
