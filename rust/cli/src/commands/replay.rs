//! Replay command handler.
//!
//! Loads a replay log written by `sim --record` and re-runs the same driver
//! against it. Without `--plays` the run continues until every recorded draw
//! has been consumed; a draw the log cannot satisfy is a divergence.

use crate::config;
use crate::drive::Driver;
use crate::error::CliError;
use crate::ui;
use gridiron_engine::replay::{ReplayLog, ReplayRandom};
use std::io::Write;
use tracing::{info, warn};

pub fn handle_replay_command(
    log: String,
    plays: Option<u32>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources().map_err(|e| {
        let _ = ui::write_error(err, &format!("Invalid configuration: {}", e));
        CliError::from(e)
    })?;
    if let Some(n) = plays
        && let Err(e) = config::validate_plays(n)
    {
        ui::write_error(err, &e.to_string())?;
        return Err(CliError::InvalidInput(e.to_string()));
    }

    let recorded = ReplayLog::load(&log).map_err(|e| {
        let _ = ui::write_error(err, &format!("Failed to read {}: {}", log, e));
        CliError::from(e)
    })?;
    let draws = recorded.draw_count();
    writeln!(
        out,
        "Replaying {} (seed {}, {} draws)",
        log, recorded.seed, draws
    )?;

    let mut rng = ReplayRandom::replay(recorded);
    let mut driver = Driver::new(resolved.config.tuning);
    let mut count = 0u32;
    loop {
        match plays {
            Some(limit) if count >= limit => break,
            None if rng.is_fully_consumed() => break,
            _ => {}
        }
        let play = match driver.step(&mut rng) {
            Ok(p) => p,
            Err(e) => {
                if e.is_replay_divergence() {
                    warn!(play = count + 1, error = %e, "replay diverged");
                }
                let msg = format!("replay diverged at play {}: {}", count + 1, e);
                ui::write_error(err, &msg)?;
                return Err(CliError::Engine(msg));
            }
        };
        count += 1;
        ui::write_play(out, count, &play)?;
    }
    ui::write_score(out, &driver.game)?;

    if rng.is_fully_consumed() {
        info!(plays = count, draws, "replay verified");
        writeln!(out, "replay verified: {} plays, {} draws", count, draws)?;
    } else {
        let (d, i, r) = rng.remaining();
        writeln!(out, "replay matched {} plays", count)?;
        ui::display_warning(
            err,
            &format!(
                "replay stopped with unread draws: doubles {}, ints {}, ranges {}",
                d, i, r
            ),
        )?;
    }
    Ok(())
}
