//! Configuration command handler.
//!
//! Prints the resolved configuration as pretty JSON, one `{value, source}`
//! pair per setting:
//!
//! ```json
//! {
//!   "seed": { "value": null, "source": "default" },
//!   "plays": { "value": 60, "source": "default" },
//!   "tuning": { "value": { ... }, "source": "default" }
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "plays": {
            "value": config.plays,
            "source": sources.plays,
        },
        "tuning": {
            "value": config.tuning,
            "source": sources.tuning,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
