//! Engine configuration resource.
//!
//! Manages engine-level settings loaded from an INI configuration file.
//! Provides defaults for safe startup. Per-game tuning lives in each game's
//! `data.json` instead, parsed by the game module's config struct.
//!
//! # Configuration File Format
//!
//! ```ini
//! [engine]
//! tick_rate = 60
//! data_dir = ./data
//!
//! [game]
//! default = bomber
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

/// Default safe values for startup
const DEFAULT_TICK_RATE: u32 = 60;
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_GAME: &str = "bomber";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file: {0}")]
    Load(String),
}

/// Engine configuration resource.
///
/// Stores the fixed tick rate, the data directory holding per-game JSON
/// files, and the default game to run.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Directory containing per-game `*.json` data files.
    pub data_dir: PathBuf,
    /// Name of the game to run when none is given on the command line.
    pub default_game: String,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            default_game: DEFAULT_GAME.to_string(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Seconds per simulation tick.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        if let Some(rate) = config.getuint("engine", "tick_rate").ok().flatten() {
            self.tick_rate = (rate as u32).max(1);
        }
        if let Some(dir) = config.get("engine", "data_dir") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(game) = config.get("game", "default") {
            self.default_game = game;
        }

        info!(
            "Loaded config: tick_rate={}, data_dir={:?}, default_game={}",
            self.tick_rate, self.data_dir, self.default_game
        );

        Ok(())
    }
}
