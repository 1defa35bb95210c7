//! Command handler modules for the gridiron CLI.
//!
//! Each subcommand lives in its own file and exposes
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`. Output
//! streams are passed in so tests can capture them.

mod cfg;
mod replay;
mod rng;
mod sim;

pub use cfg::handle_cfg_command;
pub use replay::handle_replay_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;
