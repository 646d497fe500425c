//! Handles settings for the command line. Configuration is read from
//! `config/habitlog.toml` (optional) and `HABITLOG_*` environment variables.
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use engine::{DisplayOrder, clock};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/habitlog.toml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_path: PathBuf,
    pub timezone: String,
    pub date_format: String,
    pub order: DisplayOrder,
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/habits.json"),
            timezone: clock::DEFAULT_TIMEZONE.to_string(),
            date_format: clock::DEFAULT_DATE_FORMAT.to_string(),
            order: DisplayOrder::default(),
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("HABITLOG"))
            .build()?;

        settings.try_deserialize()
    }
}
