//! Configuration management for Grove.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `grove.toml` file
//! 3. User config `~/.config/grove/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroveConfig {
    /// Graph storage configuration.
    pub storage: StorageConfig,

    /// Indexing configuration.
    pub index: IndexConfig,

    /// Entity identity configuration.
    pub identity: IdentityConfig,
}

impl Default for GroveConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            index: IndexConfig::default(),
            identity: IdentityConfig::default(),
        }
    }
}

impl GroveConfig {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./grove.toml` (project local)
    /// 2. `~/.config/grove/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new("grove.toml").exists() {
            return Self::from_file("grove.toml");
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("grove").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: GroveConfig = toml::from_str(&content)?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("GROVE_DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Ok(limit) = std::env::var("GROVE_MAX_CONCURRENT_WRITES") {
            if let Ok(n) = limit.parse() {
                self.index.max_concurrent_writes = n;
            }
        }
        if let Ok(len) = std::env::var("GROVE_FILE_HASH_LEN") {
            if let Ok(n) = len.parse() {
                self.identity.file_hash_len = n;
            }
        }
        if let Ok(len) = std::env::var("GROVE_ENTITY_HASH_LEN") {
            if let Ok(n) = len.parse() {
                self.identity.entity_hash_len = n;
            }
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = GroveConfig::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Graph storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Location of the embedded graph database.
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

/// Indexing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// File extensions to index (without leading dot).
    pub include_extensions: Vec<String>,

    /// Directories to exclude from workspace walking.
    pub exclude_dirs: Vec<String>,

    /// Maximum concurrent graph writes within one indexing phase.
    pub max_concurrent_writes: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            include_extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            max_concurrent_writes: DEFAULT_MAX_CONCURRENT_WRITES,
        }
    }
}

/// Entity identity configuration. Lengths are hex digits and must be even;
/// the resolver constructor validates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Hash suffix length of FILE ids.
    pub file_hash_len: usize,

    /// Hash suffix length of ENTITY and RELATIONSHIP ids.
    pub entity_hash_len: usize,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            file_hash_len: DEFAULT_FILE_HASH_LEN,
            entity_hash_len: DEFAULT_ENTITY_HASH_LEN,
        }
    }
}
