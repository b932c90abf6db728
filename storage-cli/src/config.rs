// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storage_core::ValidatorSettings;
use storage_core::settings::{DEFAULT_DEBOUNCE, DEFAULT_ORACLE_TIMEOUT};
use thiserror::Error;

const CONFIG_DIR: &str = "installer-storage";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// One step more verbose per `-v`
    pub fn raised(self, steps: u8) -> Self {
        (0..steps).fold(self, |level, _| match level {
            Self::Error => Self::Warn,
            Self::Warn => Self::Info,
            Self::Info => Self::Debug,
            Self::Debug | Self::Trace => Self::Trace,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ReviewConfig {
    pub log_level: LoggingLevel,
    pub log_to_disk: bool,
    pub debounce_ms: u64,
    pub oracle_timeout_ms: u64,

    /// Explicit `pwscore` binary; looked up on `PATH` otherwise
    pub pwscore_path: Option<PathBuf>,

    /// Installer bus address; read from the bus address file otherwise
    pub bus_address: Option<String>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            log_level: LoggingLevel::default(),
            log_to_disk: false,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            oracle_timeout_ms: DEFAULT_ORACLE_TIMEOUT.as_millis() as u64,
            pwscore_path: None,
            bus_address: None,
        }
    }
}

impl ReviewConfig {
    /// Load `explicit`, or the per-user config file if present.
    ///
    /// A missing per-user file yields defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn validator_settings(&self) -> ValidatorSettings {
        ValidatorSettings::from_millis(self.debounce_ms, self.oracle_timeout_ms)
    }
}

fn default_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join(CONFIG_DIR).join(CONFIG_FILE))
}
