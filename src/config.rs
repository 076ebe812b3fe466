//! Shell configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `GRID_MERGE_SEED` | time based | Tile spawn seed |
//! | `GRID_MERGE_SWIPE_DISTANCE` | `10` | Minimum mouse drag length for a move |
//! | `GRID_MERGE_LOG` | `info` | `tracing` filter directive |
//! | `GRID_MERGE_LOG_FILE` | unset | Log destination; logging is off when unset |
//!
//! Unparsable values fall back to the default.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::DEFAULT_MIN_SWIPE_DISTANCE;

pub const SEED_VAR: &str = "GRID_MERGE_SEED";
pub const SWIPE_DISTANCE_VAR: &str = "GRID_MERGE_SWIPE_DISTANCE";
pub const LOG_VAR: &str = "GRID_MERGE_LOG";
pub const LOG_FILE_VAR: &str = "GRID_MERGE_LOG_FILE";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub seed: u32,
    pub min_swipe_distance: f32,
    pub log_filter: String,
    pub log_file: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            min_swipe_distance: DEFAULT_MIN_SWIPE_DISTANCE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = var(SEED_VAR)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let min_swipe_distance = var(SWIPE_DISTANCE_VAR)
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or(DEFAULT_MIN_SWIPE_DISTANCE);

        let log_filter = var(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let log_file = var(LOG_FILE_VAR);

        Self {
            seed,
            min_swipe_distance,
            log_filter,
            log_file,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
