//! Server settings.
//!
//! Layered, lowest priority first: built-in defaults (with `PORT` from the
//! environment as the default port), `~/.config/eventsched/config.toml`,
//! then `EVENTSCHED_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};
use crate::query::DEFAULT_UPCOMING_LIMIT;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";
const FALLBACK_DATA_DIR: &str = "~/.eventsched";

/// Which [`crate::store::EventStore`] driver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    File,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub storage: StorageKind,
    pub log_level: String,
    pub upcoming_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: default_data_dir(),
            storage: StorageKind::File,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("eventsched"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

impl Settings {
    pub fn config_path() -> SchedulerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SchedulerError::Config("Could not determine config directory".into()))?
            .join("eventsched");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings from the default config file, creating it on first run.
    pub fn load() -> SchedulerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load settings using `path` as the config file. A missing file is fine.
    pub fn load_from(path: &Path) -> SchedulerResult<Self> {
        let defaults = Settings::default();
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        Config::builder()
            .set_default("host", defaults.host)
            .and_then(|b| b.set_default("port", i64::from(port)))
            .and_then(|b| b.set_default("data_dir", defaults.data_dir.to_string_lossy().into_owned()))
            .and_then(|b| b.set_default("storage", "file"))
            .and_then(|b| b.set_default("log_level", defaults.log_level))
            .and_then(|b| b.set_default("upcoming_limit", defaults.upcoming_limit as i64))
            .map_err(|e| SchedulerError::Config(e.to_string()))?
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("EVENTSCHED").try_parsing(true))
            .build()
            .map_err(|e| SchedulerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SchedulerError::Config(e.to_string()))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SchedulerResult<()> {
        let data_dir = default_data_dir().display().to_string();
        let contents = format!(
            "\
# eventsched configuration

# Address to listen on:
# host = \"{DEFAULT_HOST}\"
# port = {DEFAULT_PORT}

# Where event documents are stored:
# data_dir = '{data_dir}'

# Storage driver, \"file\" or \"memory\":
# storage = \"file\"

# Log filter when EVENTSCHED_LOG is unset:
# log_level = \"{DEFAULT_LOG_LEVEL}\"

# Number of events returned by /events/upcoming:
# upcoming_limit = {DEFAULT_UPCOMING_LIMIT}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SchedulerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SchedulerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
