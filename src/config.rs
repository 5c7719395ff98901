//! Runtime configuration.
//!
//! Loaded from a TOML file; every field has a serving default so a bare
//! `serve` works out of the box with the built-in signature catalog.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse failed: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("bind_addr must not be empty")]
    EmptyBindAddr,

    #[error("top_keywords must be at least 1")]
    ZeroTopKeywords,

    #[error("action_log_capacity must be at least 1")]
    ZeroLogCapacity,

    #[error("signature_file does not exist: {0}")]
    MissingSignatureFile(PathBuf),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP surface binds to.
    pub bind_addr: String,
    /// Bearer token required on analytics endpoints. Analytics are
    /// unreachable (401) while unset.
    pub admin_token: Option<String>,
    /// Optional signature-file override; the built-in catalog is used when
    /// unset.
    pub signature_file: Option<PathBuf>,
    /// Keyword-trend list length in the analytics overview.
    pub top_keywords: usize,
    /// Retained action-log entries before the oldest are dropped. Entries
    /// are never mutated, but this bound caps how far back
    /// moderator-performance analytics can reach; size it to cover the
    /// widest analytics window in use.
    pub action_log_capacity: usize,
    /// Emit JSON log lines instead of the compact format.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_string(),
            admin_token: None,
            signature_file: None,
            top_keywords: 10,
            action_log_capacity: 100_000,
            log_json: false,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_addr.trim().is_empty() {
            return Err(ConfigError::EmptyBindAddr);
        }
        if self.top_keywords == 0 {
            return Err(ConfigError::ZeroTopKeywords);
        }
        if self.action_log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        if let Some(path) = &self.signature_file {
            if !path.exists() {
                return Err(ConfigError::MissingSignatureFile(path.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
