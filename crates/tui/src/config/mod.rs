use std::path::PathBuf;

use clap::Parser;
use engine::{DateFormat, DisplayOrder, clock};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/habitlog.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub export_dir: PathBuf,
    pub log_path: PathBuf,
    pub level: String,
    pub timezone: String,
    pub date_format: String,
    pub order: DisplayOrder,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/habits.json"),
            export_dir: PathBuf::from("."),
            log_path: PathBuf::from("habitlog_tui.log"),
            level: "info".to_string(),
            timezone: clock::DEFAULT_TIMEZONE.to_string(),
            date_format: clock::DEFAULT_DATE_FORMAT.to_string(),
            order: DisplayOrder::default(),
        }
    }
}

impl AppConfig {
    pub fn date_format(&self) -> Result<DateFormat> {
        Ok(DateFormat::new(&self.timezone, &self.date_format)?)
    }
}

#[derive(Debug, Parser)]
#[command(name = "habitlog_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the data file (JSON).
    #[arg(long)]
    data_path: Option<PathBuf>,
    /// Override where exports are written.
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Override the log file.
    #[arg(long)]
    log_path: Option<PathBuf>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Initial list ordering (recent or coffee).
    #[arg(long)]
    order: Option<DisplayOrder>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("HABITLOG"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_path) = args.data_path {
        settings.data_path = data_path;
    }
    if let Some(export_dir) = args.export_dir {
        settings.export_dir = export_dir;
    }
    if let Some(log_path) = args.log_path {
        settings.log_path = log_path;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(order) = args.order {
        settings.order = order;
    }

    Ok(settings)
}
