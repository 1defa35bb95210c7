//! # Gridiron CLI Library
//!
//! Command-line driver for the gridiron play engine. It owns everything the
//! engine leaves to its collaborators: rosters, play calling, the game loop,
//! configuration files and the tracing subscriber.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments and dispatches to a subcommand, writing to the
//! streams it is given.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["gridiron", "sim", "--plays", "20", "--seed", "7"];
//! let code = gridiron_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Simulate plays, optionally recording the replay log and a JSONL play log
//! - `replay`: Re-run a recorded simulation and verify every draw
//! - `rng`: Print a sample from the seeded random source
//! - `cfg`: Display the resolved configuration and its sources

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
pub mod drive;
mod error;
pub mod exit_code;
pub mod logging;
pub mod roster;
pub mod ui;

use cli::{Commands, GridironCli};
use commands::{
    handle_cfg_command, handle_replay_command, handle_rng_command, handle_sim_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Returns `0` on success and `2` on any error, including a replay that
/// diverges from its log.
///
/// ```
/// use std::io;
/// let args = vec!["gridiron", "rng", "--seed", "42"];
/// let code = gridiron_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["sim", "replay", "rng", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = GridironCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Gridiron CLI").is_err()
                        || writeln!(err, "Usage: gridiron <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: gridiron --help").is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Sim {
                    plays,
                    seed,
                    record,
                    output,
                } => handle_sim_command(plays, seed, record, output, out, err),
                Commands::Replay { log, plays } => handle_replay_command(log, plays, out, err),
                Commands::Rng { seed } => handle_rng_command(seed, out),
                Commands::Cfg => handle_cfg_command(out, err),
            };
            match result {
                Ok(()) => exit_code::SUCCESS,
                // handlers that report their own failure have already written to err
                Err(CliError::Config(_) | CliError::InvalidInput(_) | CliError::Engine(_)) => {
                    exit_code::ERROR
                }
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
    }
}
