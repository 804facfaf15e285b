// Configuration management for kerfuffle
// Handles loading/saving settings, with sensible defaults when config is missing

use anyhow::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub shuffle: ShuffleSettings,
}

/// The full configuration surface of the ordering engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuffleSettings {
    /// Minimum index distance between tracks sharing an artist. Signed so a
    /// hand-edited negative value loads fine; it is clamped to 0 at use.
    pub min_artist_gap: i64,
    /// Popularity-biased base ordering instead of uniform.
    pub weighted: bool,
    /// Seed for reproducible runs. Absent means entropy seeding.
    pub rng_seed: Option<u64>,
}

impl Default for ShuffleSettings {
    fn default() -> Self {
        Self {
            min_artist_gap: 3,
            weighted: false,
            rng_seed: None,
        }
    }
}

impl ShuffleSettings {
    /// Gap with the clamp applied.
    pub fn effective_gap(&self) -> usize {
        self.min_artist_gap.max(0) as usize
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path, writing defaults there when missing.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("kerfuffle");

        Ok(config_dir.join("config.toml"))
    }
}
