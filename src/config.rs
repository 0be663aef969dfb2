use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

/// Which upstream feed the service ingests
#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum FeedSourceId {
    Swpc,
    Xras,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct ForecastParameters {
    pub window_days: usize,
    pub cache_ttl_minutes: u64,
    pub refresh_interval_secs: u64,
}

#[derive(Deserialize)]
pub struct UpstreamParameters {
    pub source: FeedSourceId,
    pub swpc_url: String,
    pub xras_url: String,
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub forecast: ForecastParameters,
    pub upstream: UpstreamParameters,
}

/// Loads the configuration file and returns a struct with all
/// configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml)
}

/// Parses and validates configuration text
///
/// # Arguments
///
/// * 'toml' - configuration file contents
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.forecast.window_days != 3 && config.forecast.window_days != 7 {
        return Err(ConfigError::from("window_days must be 3 or 7"));
    }
    if config.forecast.cache_ttl_minutes == 0 {
        return Err(ConfigError::from("cache_ttl_minutes must be positive"));
    }
    if config.upstream.timeout_secs == 0 {
        return Err(ConfigError::from("timeout_secs must be positive"));
    }

    Ok(config)
}
