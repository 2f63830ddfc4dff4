//! Optional TOML settings file.
//!
//! Every section and key may be omitted; missing values take the built-in
//! defaults. Command-line flags are applied on top by the caller.
//!
//! ```toml
//! [database]
//! backend = "sqlite"
//! connection_string = "valtera.db"
//!
//! [chart]
//! width = 60
//! height = 15
//! enabled = true
//!
//! [logging]
//! level = "info"
//! file = "valtera.log"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use valtera_core::db::DbConfig;

use crate::chart::Chart;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub chart: ChartSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Registered backend name: `sqlite` or `memory`.
    pub backend: String,
    pub connection_string: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let DbConfig {
            backend,
            connection_string,
        } = DbConfig::default();
        Self {
            backend,
            connection_string,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: usize,
    pub height: usize,
    pub enabled: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 60,
            height: 15,
            enabled: true,
        }
    }
}

impl ChartSettings {
    /// A fresh chart of the configured size, or `None` when charts are off.
    pub fn build(&self) -> Option<Chart> {
        self.enabled.then(|| Chart::new(self.width, self.height))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Bare level or full `EnvFilter` directive; `RUST_LOG` applies when
    /// unset.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl Settings {
    /// Reads and parses `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.database.backend.clone(),
            connection_string: self.database.connection_string.clone(),
        }
    }
}
