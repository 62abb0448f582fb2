//! The game catalog.
//!
//! Every game module exposes the same surface: a `Config` deserialized
//! from a JSON file in the data directory, a `spawn` that populates the
//! world, and a `schedule` with its per-frame systems. The driver picks
//! one by [`GameKind`] and runs it after the shared engine systems.

pub mod bomber;
pub mod dodge;
pub mod rpg;
pub mod shooter;
pub mod snake;
pub mod walker;
pub mod wordchain;

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Which game the driver should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GameKind {
    Bomber,
    Snake,
    Wordchain,
    Shooter,
    Dodge,
    Walker,
    Rpg,
}

impl GameKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bomber" => Some(Self::Bomber),
            "snake" => Some(Self::Snake),
            "wordchain" => Some(Self::Wordchain),
            "shooter" => Some(Self::Shooter),
            "dodge" => Some(Self::Dodge),
            "walker" => Some(Self::Walker),
            "rpg" => Some(Self::Rpg),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bomber => "bomber",
            Self::Snake => "snake",
            Self::Wordchain => "wordchain",
            Self::Shooter => "shooter",
            Self::Dodge => "dodge",
            Self::Walker => "walker",
            Self::Rpg => "rpg",
        }
    }
}

/// The game chosen on the command line, read by the `enter_play` hook.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SelectedGame(pub GameKind);

/// Load a game's tuning file (`<data_dir>/<name>.json`). Missing or
/// malformed files fall back to the built-in defaults with a warning, so
/// a bare checkout still runs every game.
pub fn load_game_config<T: DeserializeOwned + Default>(data_dir: &Path, name: &str) -> T {
    let path = data_dir.join(format!("{name}.json"));
    match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(config) => {
                debug!("loaded {}", path.display());
                config
            }
            Err(err) => {
                warn!("bad config {}: {err}, using defaults", path.display());
                T::default()
            }
        },
        Err(err) => {
            warn!("no config {}: {err}, using defaults", path.display());
            T::default()
        }
    }
}
