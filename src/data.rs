//! JSON data files: rate constants, economy, and the banner schedule.
//!
//! These are the on-disk equivalents of the old `data.json` / `banners.json`
//! pair. Missing or malformed rate data degrades to the built-in defaults;
//! the banner schedule has no sensible default and loads strictly.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::banner::{Banner, GachaRates};
use crate::constants::DEFAULT_ORO_PER_PULL;

/// Rate constants plus the pull economy, as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    #[serde(flatten)]
    pub rates: GachaRates,

    /// Oroberyl cost of a single pull
    pub oro_per_pull: u64,
}

impl Default for GameData {
    fn default() -> Self {
        Self {
            rates: GachaRates::default(),
            oro_per_pull: DEFAULT_ORO_PER_PULL,
        }
    }
}

/// The banner schedule file: just the currently running banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerCatalog {
    pub current: Banner,
}

/// Load rate/economy data from a JSON file.
pub fn load_game_data(path: &Path) -> io::Result<GameData> {
    load_json(path)
}

/// Load rate/economy data, falling back to defaults if the file is missing
/// or invalid.
pub fn load_game_data_or_default(path: &Path) -> GameData {
    load_game_data(path).unwrap_or_default()
}

/// Load the banner schedule from a JSON file.
pub fn load_banner_catalog(path: &Path) -> io::Result<BannerCatalog> {
    load_json(path)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<T> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
