use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::difficulty::Difficulty;
use crate::storage::DEFAULT_SCORE_FILE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Arena width in world units
    pub arena_width: f64,
    /// Arena height in world units
    pub arena_height: f64,
    /// Visual diameter of a segment, also the item grid cell
    pub segment_size: f64,
    /// Maximum number of segments
    pub segment_capacity: usize,
    /// Length of the snake when a session starts
    pub initial_snake_length: usize,
    /// Host tick period
    pub tick_interval_ms: u64,

    // Effect windows
    pub speed_boost_ms: u64,
    pub slow_ms: u64,
    pub rainbow_ms: u64,

    /// Random placements tried before scanning for a free cell
    pub max_spawn_attempts: usize,

    /// Difficulty preselected in the menu
    pub difficulty: Difficulty,
    /// Where the best score is kept
    pub best_score_path: PathBuf,
    /// Fixed seed for item placement, entropy when unset
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 600.0,
            arena_height: 600.0,
            segment_size: 10.0,
            segment_capacity: 900,
            initial_snake_length: 3,
            tick_interval_ms: 16,
            speed_boost_ms: 5000,
            slow_ms: 3000,
            rainbow_ms: 10000,
            max_spawn_attempts: 10_000,
            difficulty: Difficulty::Medium,
            best_score_path: PathBuf::from(DEFAULT_SCORE_FILE),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom arena size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            ..Default::default()
        }
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.segment_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "segment_size must be positive, got {}",
                self.segment_size
            )));
        }
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "arena must be positive, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }
        if self.initial_snake_length == 0 || self.initial_snake_length > self.segment_capacity {
            return Err(ConfigError::Invalid(format!(
                "initial_snake_length must be in 1..={}, got {}",
                self.segment_capacity, self.initial_snake_length
            )));
        }

        // The snake starts centred and stretches left from there
        let tail_offset = (self.initial_snake_length - 1) as f64 * self.segment_size;
        let min_side = 2.0 * self.segment_size;
        if tail_offset > self.arena_width / 2.0
            || self.arena_width < min_side
            || self.arena_height < min_side
        {
            return Err(ConfigError::Invalid(format!(
                "arena {}x{} is too small for a snake of {} segments",
                self.arena_width, self.arena_height, self.initial_snake_length
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be non-zero".into()));
        }
        Ok(())
    }
}
