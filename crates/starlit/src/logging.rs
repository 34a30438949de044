//! File logging. The terminal belongs to ratatui, so nothing goes to stdout.

use std::fs::{self, OpenOptions};
use std::str::FromStr;
use std::sync::Mutex;

use color_eyre::eyre::{Result, WrapErr};
use tracing::Level;

/// Environment variable selecting the log level.
const LOG_LEVEL_ENV: &str = "STARLIT_LOG";

/// Install a subscriber writing to the starlit log file.
pub fn init() -> Result<()> {
    let Some(path) = starlit_config::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level(std::env::var(LOG_LEVEL_ENV).ok().as_deref()))
        .init();
    Ok(())
}

fn level(value: Option<&str>) -> Level {
    value
        .and_then(|v| Level::from_str(v.trim()).ok())
        .unwrap_or(Level::INFO)
}
