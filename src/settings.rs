//! Startup settings for the terminal shell
//!
//! Session durations are fixed constants; only the poll cadence, the
//! countdown strategy and the log location can be chosen, once, from the
//! environment:
//! - `POMODORO_TICK_MS`: poll cadence in milliseconds (1..=1000, default 100)
//! - `POMODORO_COUNTDOWN`: `deadline` (default) or `counter`
//! - `POMODORO_LOG_DIR`: log directory override

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::pomodoro::{CountdownStrategy, DEFAULT_TICK_INTERVAL};

pub const TICK_MS_ENV: &str = "POMODORO_TICK_MS";
pub const COUNTDOWN_ENV: &str = "POMODORO_COUNTDOWN";
pub const LOG_DIR_ENV: &str = "POMODORO_LOG_DIR";

const APP_DIR: &str = "pomodoro-tui";
const MAX_TICK_MS: u64 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("POMODORO_TICK_MS must be a whole number of milliseconds, got '{0}'")]
    InvalidTickInterval(String),

    #[error("POMODORO_TICK_MS must be between 1 and 1000, got {0}")]
    TickIntervalOutOfRange(u64),

    #[error("POMODORO_COUNTDOWN must be 'deadline' or 'counter', got '{0}'")]
    UnknownCountdown(String),

    #[error("No state or cache directory available; set POMODORO_LOG_DIR")]
    NoLogDir,
}

/// Shell settings resolved at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub tick_interval: Duration,
    pub countdown: CountdownStrategy,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`, so callers control where values come from
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tick_interval = match lookup(TICK_MS_ENV) {
            Some(raw) if !raw.trim().is_empty() => parse_tick_ms(&raw)?,
            _ => DEFAULT_TICK_INTERVAL,
        };

        let countdown = match lookup(COUNTDOWN_ENV).as_deref().map(str::trim) {
            None | Some("") => CountdownStrategy::Deadline,
            Some(value) if value.eq_ignore_ascii_case("deadline") => CountdownStrategy::Deadline,
            Some(value) if value.eq_ignore_ascii_case("counter") => CountdownStrategy::Counter {
                step: tick_interval,
            },
            Some(other) => return Err(ConfigError::UnknownCountdown(other.to_string())),
        };

        let log_dir = match lookup(LOG_DIR_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_log_dir().ok_or(ConfigError::NoLogDir)?,
        };

        Ok(Self {
            tick_interval,
            countdown,
            log_dir,
        })
    }
}

fn parse_tick_ms(raw: &str) -> Result<Duration, ConfigError> {
    let ms: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidTickInterval(raw.to_string()))?;
    if ms == 0 || ms > MAX_TICK_MS {
        return Err(ConfigError::TickIntervalOutOfRange(ms));
    }
    Ok(Duration::from_millis(ms))
}

/// `$XDG_STATE_HOME/pomodoro-tui`, falling back to the cache directory
fn default_log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|dir| dir.join(APP_DIR))
}
