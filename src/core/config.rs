use std::env;
use std::str::FromStr;

use tracing::Level;

use crate::errors::AdapterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl FromStr for LogFormat {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            other => Err(AdapterError::Config(format!(
                "ALBWRAP_LOG_FORMAT: unknown format '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub log_format: LogFormat,
    pub log_level: Level,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            log_level: Level::INFO,
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Result<Self, AdapterError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdapterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_format = match lookup("ALBWRAP_LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => defaults.log_format,
        };

        let log_level = match lookup("ALBWRAP_LOG_LEVEL") {
            Some(v) => v.trim().parse::<Level>().map_err(|e| {
                AdapterError::Config(format!("ALBWRAP_LOG_LEVEL: {e}"))
            })?,
            None => defaults.log_level,
        };

        Ok(Self {
            log_format,
            log_level,
        })
    }
}
