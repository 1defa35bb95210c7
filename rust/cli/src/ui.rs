//! Terminal output helpers shared by the subcommands.

use gridiron_engine::game::{Game, Possession};
use gridiron_engine::play::Play;
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

pub fn team_name(team: Possession) -> &'static str {
    match team {
        Possession::Home => "Home",
        Possession::Away => "Away",
    }
}

/// Numbered summary line followed by the play-by-play narrative.
pub fn write_play(out: &mut dyn Write, number: u32, play: &Play) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>4}. [{}] {}",
        number,
        team_name(play.possession),
        play.summary()
    )?;
    for line in &play.commentary {
        writeln!(out, "        {}", line)?;
    }
    Ok(())
}

pub fn write_score(out: &mut dyn Write, game: &Game) -> std::io::Result<()> {
    writeln!(
        out,
        "Score: Home {} - Away {} after {} plays",
        game.home_score, game.away_score, game.plays_run
    )
}
