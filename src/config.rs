//! Runtime configuration from `BLOCKFALL_*` environment variables.

use std::path::PathBuf;

use log::LevelFilter;
use thiserror::Error;

use crate::core::SessionConfig;
use crate::types::{FRAME_MS, GRAVITY_TICK_MS, KEY_RELEASE_TIMEOUT_MS, SOFT_DROP_REPEAT_MS};

pub const GRAVITY_VAR: &str = "BLOCKFALL_GRAVITY_MS";
pub const SOFT_DROP_VAR: &str = "BLOCKFALL_SOFT_DROP_MS";
pub const FRAME_VAR: &str = "BLOCKFALL_FRAME_MS";
pub const KEY_RELEASE_VAR: &str = "BLOCKFALL_KEY_RELEASE_MS";
pub const LOG_PATH_VAR: &str = "BLOCKFALL_LOG_PATH";
pub const LOG_LEVEL_VAR: &str = "BLOCKFALL_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive number of milliseconds, got {value:?}")]
    InvalidPeriod { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub gravity_ms: u32,
    pub soft_drop_ms: u32,
    pub frame_ms: u32,
    pub key_release_ms: u32,
    /// Log file; logging is off when unset
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity_ms: GRAVITY_TICK_MS,
            soft_drop_ms: SOFT_DROP_REPEAT_MS,
            frame_ms: FRAME_MS,
            key_release_ms: KEY_RELEASE_TIMEOUT_MS,
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], but bad timing values fall back to the
    /// defaults. The error is handed back so it can be logged once logging
    /// is up.
    pub fn from_env_or_default() -> (Self, Option<ConfigError>) {
        let lookup = |key: &str| std::env::var(key).ok();
        match Self::from_lookup(lookup) {
            Ok(config) => (config, None),
            Err(err) => {
                let (log_path, log_level) = log_settings(&lookup);
                let config = Self {
                    log_path,
                    log_level,
                    ..Self::default()
                };
                (config, Some(err))
            }
        }
    }

    /// Parse from any key lookup. Unset or blank variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let (log_path, log_level) = log_settings(&lookup);
        Ok(Self {
            gravity_ms: period(&lookup, GRAVITY_VAR, defaults.gravity_ms)?,
            soft_drop_ms: period(&lookup, SOFT_DROP_VAR, defaults.soft_drop_ms)?,
            frame_ms: period(&lookup, FRAME_VAR, defaults.frame_ms)?,
            key_release_ms: period(&lookup, KEY_RELEASE_VAR, defaults.key_release_ms)?,
            log_path,
            log_level,
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            gravity_ms: self.gravity_ms,
            soft_drop_ms: self.soft_drop_ms,
        }
    }
}

fn non_blank(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    lookup(var)
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

fn period(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u32,
) -> Result<u32, ConfigError> {
    let Some(value) = non_blank(lookup, var) else {
        return Ok(default);
    };
    match value.parse::<u32>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ConfigError::InvalidPeriod { var, value }),
    }
}

/// An unknown level name keeps the default level.
fn log_settings(lookup: &impl Fn(&str) -> Option<String>) -> (Option<PathBuf>, LevelFilter) {
    let log_path = non_blank(lookup, LOG_PATH_VAR).map(PathBuf::from);
    let log_level = non_blank(lookup, LOG_LEVEL_VAR)
        .and_then(|s| s.parse().ok())
        .unwrap_or(LevelFilter::Info);
    (log_path, log_level)
}
