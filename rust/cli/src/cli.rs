//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gridiron",
    version,
    about = "Gridiron play engine CLI",
    long_about = "Drives the stochastic play engine: simulate drives, verify replay logs, inspect the RNG and configuration."
)]
pub struct GridironCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate a sequence of plays with the built-in rosters
    Sim {
        /// Number of plays (overrides GRIDIRON_PLAYS and the config file)
        #[arg(long)]
        plays: Option<u32>,
        /// RNG seed (overrides GRIDIRON_SEED and the config file)
        #[arg(long)]
        seed: Option<u64>,
        /// Write the replay log of every draw to this path
        #[arg(long)]
        record: Option<String>,
        /// Write one JSON line per play to this path
        #[arg(long)]
        output: Option<String>,
    },
    /// Re-run a recorded simulation against its replay log
    Replay {
        #[arg(long)]
        log: String,
        /// Stop after this many plays instead of draining the log
        #[arg(long)]
        plays: Option<u32>,
    },
    /// Print a sample from the seeded random source
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
