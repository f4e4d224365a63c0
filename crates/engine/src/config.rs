//! Game configuration from environment variables.
//!
//! - `BLOCKFALL_ROWS`: board rows (default: 20)
//! - `BLOCKFALL_COLUMNS`: board columns (default: 10)
//! - `BLOCKFALL_TICK_MS`: gravity interval in milliseconds (default: 500)
//! - `BLOCKFALL_SEED`: RNG seed (default: derived from the clock)
//! - `BLOCKFALL_LOG_PATH`: log file; no logging when unset
//! - `BLOCKFALL_LOG_LEVEL`: `error`..`trace` (default: `info`)
//!
//! Unparseable values fall back to the default.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use log::LevelFilter;

use crate::types::{BOARD_COLUMNS, BOARD_ROWS, TICK_INTERVAL_MS};

/// Smallest board side that fits every canonical shape.
pub const MIN_BOARD_SIDE: usize = 4;

/// Largest accepted board side.
pub const MAX_BOARD_SIDE: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub tick_interval: Duration,
    pub seed: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            columns: BOARD_COLUMNS,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            seed: None,
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl GameConfig {
    /// Create from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let rows = parsed("BLOCKFALL_ROWS")
            .map(|v| v as usize)
            .unwrap_or(defaults.rows);
        let columns = parsed("BLOCKFALL_COLUMNS")
            .map(|v| v as usize)
            .unwrap_or(defaults.columns);
        let tick_interval = parsed("BLOCKFALL_TICK_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick_interval);
        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse::<u32>().ok());

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });
        let log_level = lookup("BLOCKFALL_LOG_LEVEL")
            .and_then(|s| s.trim().parse::<LevelFilter>().ok())
            .unwrap_or(defaults.log_level);

        Self {
            rows,
            columns,
            tick_interval,
            seed,
            log_path,
            log_level,
        }
    }

    /// Reject sizes the game cannot be played on.
    pub fn validate(&self) -> Result<()> {
        let side = MIN_BOARD_SIDE..=MAX_BOARD_SIDE;
        if !side.contains(&self.rows) {
            bail!(
                "board rows must be in {}..={}, got {}",
                MIN_BOARD_SIDE,
                MAX_BOARD_SIDE,
                self.rows
            );
        }
        if !side.contains(&self.columns) {
            bail!(
                "board columns must be in {}..={}, got {}",
                MIN_BOARD_SIDE,
                MAX_BOARD_SIDE,
                self.columns
            );
        }
        if self.tick_interval.is_zero() {
            bail!("tick interval must be non-zero");
        }
        Ok(())
    }

    /// Configured seed, or one derived from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u32)
                .unwrap_or(1)
        })
    }
}
