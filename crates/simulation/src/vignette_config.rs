//! Runtime configuration for one vignette session.
//!
//! Defaults reproduce the stock vignette. A JSON file named by
//! `VIGNETTE_CONFIG` may override any subset of fields, and `VIGNETTE_SEED`
//! pins the terrain seed without a file.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{REVEAL_LABEL, WORLD_DEPTH, WORLD_WIDTH};

/// Environment variable holding the path of a JSON config file.
pub const CONFIG_PATH_ENV: &str = "VIGNETTE_CONFIG";
/// Environment variable holding a `u64` terrain seed.
pub const SEED_ENV: &str = "VIGNETTE_SEED";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VignetteConfig {
    /// Heightmap vertices along X.
    pub world_width: usize,
    /// Heightmap vertices along Z.
    pub world_depth: usize,
    /// Fixed terrain seed. `None` draws a fresh landscape each session.
    pub seed: Option<u64>,
    /// Text revealed after the last advance.
    pub label: String,
    /// Font asset for the label. `None` uses the built-in font.
    pub font_path: Option<String>,
    /// Tiling ground texture. `None` colours the terrain by elevation.
    pub terrain_texture: Option<String>,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_depth: WORLD_DEPTH,
            seed: None,
            label: REVEAL_LABEL.to_string(),
            font_path: None,
            terrain_texture: None,
        }
    }
}

impl VignetteConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Resolve the session config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV);
        let seed = std::env::var(SEED_ENV).ok();
        Self::resolve(path.as_deref().map(Path::new), seed.as_deref())
    }

    /// Layer an optional config file and an optional seed override over the
    /// defaults.
    pub fn resolve(path: Option<&Path>, seed: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(raw) = seed {
            let parsed = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed(raw.to_string()))?;
            config.seed = Some(parsed);
        }
        Ok(config)
    }
}

/// Errors raised while resolving [`VignetteConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(std::io::Error),
    /// The config file is not valid JSON for this schema.
    Parse(serde_json::Error),
    /// `VIGNETTE_SEED` is not an unsigned 64-bit integer.
    InvalidSeed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid config file: {e}"),
            ConfigError::InvalidSeed(raw) => {
                write!(f, "{SEED_ENV} must be an unsigned integer, got {raw:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::InvalidSeed(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
