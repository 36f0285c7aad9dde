// ⚙️ Session configuration
// Registration-date policy, log level and output mode, from an optional TOML file.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid registration date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Where new members get their registration date from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSource {
    /// Stamp `registration_date` on every new member.
    #[default]
    Fixed,
    /// Stamp the local calendar date at the time of the add.
    Today,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registration_date")]
    pub registration_date: String,
    #[serde(default)]
    pub date_source: DateSource,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registration_date: default_registration_date(),
            date_source: DateSource::default(),
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_registration_date() -> String {
    "2024-03-26".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl RegistryConfig {
    /// Defaults when `path` is None, otherwise the parsed file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        NaiveDate::parse_from_str(&self.registration_date, DATE_FORMAT)
            .map_err(|_| ConfigError::InvalidDate(self.registration_date.clone()))?;
        Ok(())
    }

    /// Date string to stamp on a member added right now.
    pub fn registration_date(&self) -> String {
        match self.date_source {
            DateSource::Fixed => self.registration_date.clone(),
            DateSource::Today => Local::now().format(DATE_FORMAT).to_string(),
        }
    }
}
