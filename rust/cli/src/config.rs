use gridiron_engine::tuning::Tuning;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "GRIDIRON_CONFIG";
pub const SEED_ENV: &str = "GRIDIRON_SEED";
pub const PLAYS_ENV: &str = "GRIDIRON_PLAYS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub plays: u32,
    pub tuning: Tuning,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub plays: ValueSource,
    pub tuning: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            plays: ValueSource::Default,
            tuning: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            plays: 60,
            tuning: Tuning::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Defaults, then the TOML file named by `GRIDIRON_CONFIG`, then env overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.plays {
            cfg.plays = v;
            sources.plays = ValueSource::File;
        }
        if let Some(v) = f.tuning {
            cfg.tuning = v;
            sources.tuning = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(plays) = std::env::var(PLAYS_ENV)
        && !plays.is_empty()
    {
        cfg.plays = plays
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid plays: {}", plays)))?;
        sources.plays = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    plays: Option<u32>,
    /// Partial tables are fine; missing constants keep their defaults.
    #[serde(default)]
    tuning: Option<Tuning>,
}

pub fn validate_plays(plays: u32) -> Result<(), ConfigError> {
    if plays == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: plays must be >0".into(),
        ));
    }
    Ok(())
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    validate_plays(cfg.plays)?;
    let p = &cfg.tuning.penalties;
    if !(p.frequency_scale.is_finite() && p.frequency_scale >= 0.0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: tuning.penalties.frequency_scale must be >=0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_tuning_table_keeps_other_defaults() {
        let f: FileConfig =
            toml::from_str("plays = 12\n[tuning.field_goals]\nhold_depth = 8\n").unwrap();
        assert_eq!(f.plays, Some(12));
        let t = f.tuning.unwrap();
        assert_eq!(t.field_goals.hold_depth, 8);
        assert_eq!(t.passing, Tuning::default().passing);
    }

    #[test]
    fn zero_plays_is_rejected() {
        let cfg = Config {
            plays: 0,
            ..Config::default()
        };
        let e = validate(&cfg).unwrap_err();
        assert!(e.to_string().contains("plays must be >0"));
    }

    #[test]
    fn sources_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&ValueSource::File).unwrap(),
            "\"file\""
        );
    }
}
