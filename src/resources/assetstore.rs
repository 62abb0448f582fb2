//! Asset manifest store.
//!
//! Each game's `data.json` may carry an `assets` section mapping keys to
//! image/audio file paths. The original games preloaded these before the
//! first frame and fell back to placeholder colors when a file failed to
//! load; this store mirrors that contract headless. Loading records each
//! entry's on-disk size, logs a warning for missing files, and keeps a
//! placeholder record in their place so the game still starts.

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset key {0:?} is not in the manifest")]
    UnknownKey(String),
}

/// A loaded (or placeholder) asset entry.
#[derive(Debug, Clone)]
pub struct AssetRecord {
    /// Path the manifest pointed at.
    pub path: PathBuf,
    /// File size in bytes, when the file exists.
    pub bytes: Option<u64>,
    /// True when the file was missing and a placeholder stands in.
    pub placeholder: bool,
}

/// Store of manifest assets addressed by key.
#[derive(Resource, Debug, Clone, Default)]
pub struct AssetStore {
    map: FxHashMap<String, AssetRecord>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest of key → relative path entries against a base
    /// directory. Missing files are logged and kept as placeholders.
    pub fn load_manifest(&mut self, base_dir: &Path, manifest: &FxHashMap<String, String>) {
        for (key, rel) in manifest {
            let path = base_dir.join(rel);
            match std::fs::metadata(&path) {
                Ok(meta) => {
                    self.map.insert(
                        key.clone(),
                        AssetRecord {
                            path,
                            bytes: Some(meta.len()),
                            placeholder: false,
                        },
                    );
                }
                Err(e) => {
                    warn!("asset {key:?} missing at {}: {e}; using placeholder", path.display());
                    self.map.insert(
                        key.clone(),
                        AssetRecord {
                            path,
                            bytes: None,
                            placeholder: true,
                        },
                    );
                }
            }
        }
        info!(
            "asset manifest loaded: {} entries ({} placeholders)",
            self.len(),
            self.map.values().filter(|r| r.placeholder).count()
        );
    }

    /// Look up an asset record by key.
    pub fn get(&self, key: &str) -> Result<&AssetRecord, AssetError> {
        self.map
            .get(key)
            .ok_or_else(|| AssetError::UnknownKey(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
