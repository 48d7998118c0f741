//! Runner configuration, stored as JSON.

use condensate::{CondensationConfig, ConfigError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum RunnerError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(ConfigError),
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunnerError::Io(e) => write!(f, "I/O error: {}", e),
            RunnerError::Json(e) => write!(f, "malformed run config: {}", e),
            RunnerError::Config(e) => write!(f, "invalid simulation config: {}", e),
        }
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunnerError::Io(e) => Some(e),
            RunnerError::Json(e) => Some(e),
            RunnerError::Config(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for RunnerError {
    fn from(e: std::io::Error) -> Self {
        RunnerError::Io(e)
    }
}

impl From<serde_json::Error> for RunnerError {
    fn from(e: serde_json::Error) -> Self {
        RunnerError::Json(e)
    }
}

impl From<ConfigError> for RunnerError {
    fn from(e: ConfigError) -> Self {
        RunnerError::Config(e)
    }
}

/// Everything one headless run needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub simulation: CondensationConfig,
    /// Atoms spawned at random before the first tick.
    pub atom_count: usize,
    pub ticks: u64,
    /// Log a progress line every this many ticks. 0 disables progress lines.
    pub report_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            simulation: CondensationConfig::default(),
            atom_count: 40,
            ticks: 10_000,
            report_every: 1_000,
        }
    }
}

impl RunConfig {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RunnerError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RunnerError> {
        let json = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&json)?;
        config.simulation.validate()?;
        Ok(config)
    }
}
