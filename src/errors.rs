use std::fmt;
use std::fmt::Formatter;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self {
        ConfigError(e.to_string())
    }
}

pub struct InitError(pub String);

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "InitError: {}", self.0)
    }
}
impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        InitError(e.to_string())
    }
}
impl From<anyhow::Error> for InitError {
    fn from(e: anyhow::Error) -> Self {
        InitError(e.to_string())
    }
}

/// Failures on the path from upstream bytes to a canonical window.
///
/// Transport and IncompleteFeed make the whole window unusable and the
/// caller substitutes synthetic data for all of it. PartialData names the
/// dates that need per-day substitution while the rest of the window is
/// kept. UpstreamReported carries a failure message the feed itself
/// delivered and is passed through to the caller.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("upstream transport error: {0}")]
    Transport(String),
    #[error("incomplete kp bulletin: {0}")]
    IncompleteFeed(String),
    #[error("upstream reported failure: {0}")]
    UpstreamReported(String),
    #[error("upstream covered fewer days than requested, approximating {0:?}")]
    PartialData(Vec<NaiveDate>),
}
impl From<ureq::Error> for FeedError {
    fn from(e: ureq::Error) -> FeedError {
        FeedError::Transport(format!("http request error: {}", e))
    }
}
impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> FeedError {
        FeedError::IncompleteFeed(format!("json document error: {}", e))
    }
}
