use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use thiserror::Error;

mod general;
mod log;
mod report;

pub use general::General;
pub use log::Log;
#[cfg(test)]
pub use log::LogLevel;
pub use report::ReportConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid series filter: {0}")]
    Pattern(#[from] regex::Error),
    #[error("invalid timezone offset {value:?}: {source}")]
    Duration {
        value: String,
        source: humantime::DurationError,
    },
    #[error("bad listen address: {0}")]
    Listen(String),
}

/// Optional TOML configuration. Every section may be left out.
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    log: Log,
    #[serde(default)]
    report: ReportConfig,
}

impl Config {
    pub fn load(path: &dyn AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;

        config.general.check()?;
        config.report.check()?;

        Ok(config)
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn log(&self) -> &Log {
        &self.log
    }

    pub fn report(&self) -> &ReportConfig {
        &self.report
    }
}

/// Resolves a `host:port` string to the first matching socket address.
pub fn resolve(listen: &str) -> Result<SocketAddr, ConfigError> {
    listen
        .to_socket_addrs()
        .map_err(|e| ConfigError::Listen(format!("{listen}: {e}")))?
        .next()
        .ok_or_else(|| ConfigError::Listen(format!("{listen}: could not resolve socket addr")))
}
