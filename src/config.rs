//! Engine configuration — loads optional ~/.groupvibe/engine.yaml.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::playlist::{PlaylistEngine, PlaylistLimits, ScoreWeights};
use crate::vibe::{RoundingMode, VibeAggregator, DEFAULT_MAX_TARGET_GENRES};

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for aggregation and ranking. Every field is optional in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tie rule for the two-decimal consensus values.
    pub rounding: RoundingMode,
    /// How many genres a vibe targets.
    pub max_target_genres: usize,
    pub weights: ScoreWeights,
    /// Limits used when a request carries no (usable) settings.
    pub playlist: PlaylistLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::default(),
            max_target_genres: DEFAULT_MAX_TARGET_GENRES,
            weights: ScoreWeights::default(),
            playlist: PlaylistLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Standard config location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".groupvibe").join("engine.yaml"))
    }

    /// Load from the standard path. Returns None if the file doesn't exist
    /// or can't be used.
    pub fn load() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load_from(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("ignoring config: {e}");
                None
            }
        }
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config document without validating it.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Reject weights and limits the engine cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        for (name, value) in [("genre", w.genre), ("energy", w.energy), ("familiarity", w.familiarity)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "weight `{name}` must be a non-negative number, got {value}"
                )));
            }
        }
        if self.max_target_genres == 0 {
            return Err(ConfigError::Invalid("max_target_genres must be at least 1".into()));
        }
        if self.playlist.max_length == 0 || self.playlist.max_per_artist == 0 {
            return Err(ConfigError::Invalid(
                "playlist max_length and max_per_artist must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Aggregator configured with this rounding and genre limit.
    pub fn aggregator(&self) -> VibeAggregator {
        VibeAggregator::new()
            .with_rounding(self.rounding)
            .with_max_target_genres(self.max_target_genres)
    }

    /// Playlist engine configured with these weights and limits.
    pub fn engine(&self) -> PlaylistEngine {
        PlaylistEngine::new()
            .with_weights(self.weights)
            .with_limits(self.playlist)
    }
}
