//! Game configuration, loaded from TOML.

use crate::error::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "hangul-wordle";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Hard-mode flag for a fresh game.
    pub hard_mode: bool,
    pub max_guesses: usize,
    /// Syllables per word.
    pub word_length: usize,
    /// Day 0 of the daily answer sequence.
    pub epoch: NaiveDate,
    /// Optional word list replacing the built-in one.
    pub dictionary: Option<PathBuf>,
    pub storage: StorageConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hard_mode: false,
            max_guesses: 6,
            word_length: 2,
            epoch: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            dictionary: None,
            storage: StorageConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Blob store directory. Defaults to the platform data dir.
    pub dir: Option<PathBuf>,
    pub format: StorageFormat,
}

impl StorageConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return dir.clone();
        }
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .map(|base| base.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(APP_DIR))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    /// bincode
    #[default]
    Binary,
    Json,
}

impl GameConfig {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: GameConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./hangul-wordle.toml`
    /// 2. `<config dir>/hangul-wordle/config.toml`
    ///
    /// Returns default config if no file found.
    pub fn load_default() -> Self {
        if let Ok(config) = Self::load("hangul-wordle.toml") {
            return config;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join(APP_DIR).join("config.toml");
            match Self::load(&config_path) {
                Ok(config) => return config,
                Err(ConfigError::Read(_)) => {}
                Err(e) => log::warn!("ignoring {}: {}", config_path.display(), e),
            }
        }

        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
