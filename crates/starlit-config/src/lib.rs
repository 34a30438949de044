//! Configuration file loading for starlit.
//!
//! Settings live in `config.toml` (or `config.json`) inside the platform
//! config directory. Every key is optional and mirrors [`ConfigPatch`], plus
//! a `seed` for a reproducible field.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, eyre};
use directories::ProjectDirs;
use serde::Deserialize;
use starlit_core::{ConfigPatch, Merge};
use tracing::debug;

/// Selector used when neither the file nor the environment names one.
pub const DEFAULT_CONTAINER: &str = "#sky";

/// Environment variable overriding the container selector.
pub const CONTAINER_ENV: &str = "STARLIT_CONTAINER";

/// File names looked up in the config directory, in order.
const CONFIG_FILES: [&str; 2] = ["config.toml", "config.json"];

/// Settings read from the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the star field's random generator.
    pub seed: Option<u64>,
    /// Options merged over the built-in defaults at startup.
    #[serde(flatten)]
    pub options: ConfigPatch,
}

impl Settings {
    /// Load settings from the platform config directory.
    ///
    /// A missing file yields empty settings. The container selector falls
    /// back to [`CONTAINER_ENV`] and then [`DEFAULT_CONTAINER`].
    pub fn load() -> Result<Self> {
        let mut settings = match Self::config_file() {
            Some(path) => Self::load_from(&path)?,
            None => {
                debug!("no configuration file found, using defaults");
                Self::default()
            }
        };
        settings.apply_container_override(std::env::var(CONTAINER_ENV).ok());
        Ok(settings)
    }

    /// Load settings from `path`, picking the format from its extension.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let settings = Self::parse(path, &content)?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok(settings)
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(content)
                .wrap_err_with(|| format!("invalid TOML in {}", path.display())),
            Some("json") => serde_json::from_str(content)
                .wrap_err_with(|| format!("invalid JSON in {}", path.display())),
            _ => Err(eyre!(
                "unsupported configuration format: {}",
                path.display()
            )),
        }
    }

    /// Layer another set of options over these settings.
    pub fn merge_options(&mut self, options: &ConfigPatch) {
        self.options.merge(options);
    }

    fn apply_container_override(&mut self, from_env: Option<String>) {
        if let Some(container) = from_env.filter(|c| !c.trim().is_empty()) {
            self.options.container = Some(container);
        }
        if self.options.container.is_none() {
            self.options.container = Some(DEFAULT_CONTAINER.to_string());
        }
    }

    /// First existing configuration file in the config directory.
    pub fn config_file() -> Option<PathBuf> {
        let dir = project_dirs()?.config_dir().to_path_buf();
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}

/// Where the log file is written.
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("starlit.log"))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io.github", "am2rican5", "starlit")
}
