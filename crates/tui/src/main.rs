mod app;
mod config;
mod error;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use crate::error::Result;

fn main() -> Result<()> {
    let config = config::load()?;
    init_logging(&config)?;

    let mut app = app::App::from_config(&config)?;
    ui::install_panic_hook();
    app.run()?;
    tracing::info!("bye");
    Ok(())
}

/// The alternate screen owns stdout, so logs go to a file.
fn init_logging(config: &config::AppConfig) -> Result<()> {
    if let Some(parent) = config.log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "habitlog_tui={level},engine={level}",
            level = config.level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
