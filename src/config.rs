use std::path::{Path, PathBuf};

use tracing::warn;

use crate::board::{GameKind, CONNECT_COLUMNS, CONNECT_ROWS, MAX_CONNECT_SIZE, MIN_CONNECT_SIZE};
use crate::engine::Difficulty;
use crate::error::ConfigError;

/// Deepest minimax search a configuration may request
pub const MAX_DEPTH: u8 = 8;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub ai: AiConfig,
    pub scores: ScoreConfig,
}

/// Which game to play and, for connect four, the board geometry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub kind: GameKind,
    /// Connect-four columns (ignored for chess)
    pub columns: u8,
    /// Connect-four rows (ignored for chess)
    pub rows: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            kind: GameKind::ConnectFour,
            columns: CONNECT_COLUMNS,
            rows: CONNECT_ROWS,
        }
    }
}

/// AI opponent settings.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// Fixed RNG seed; the OS seeds the engine when absent
    pub seed: Option<u64>,
    /// Replaces the difficulty's search depth
    pub depth: Option<u8>,
    /// Replaces the difficulty's blunder chance
    pub blunder_chance: Option<f64>,
}

/// Where the CLI keeps its score totals.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// JSON score file; scores are not persisted when absent
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = MIN_CONNECT_SIZE..=MAX_CONNECT_SIZE;
        if !sizes.contains(&self.game.columns) {
            return Err(ConfigError::Validation(format!(
                "game.columns must be in [{MIN_CONNECT_SIZE}, {MAX_CONNECT_SIZE}]"
            )));
        }
        if !sizes.contains(&self.game.rows) {
            return Err(ConfigError::Validation(format!(
                "game.rows must be in [{MIN_CONNECT_SIZE}, {MAX_CONNECT_SIZE}]"
            )));
        }
        if let Some(chance) = self.ai.blunder_chance {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Validation(
                    "ai.blunder_chance must be in [0, 1]".into(),
                ));
            }
        }
        if self.ai.depth.is_some_and(|depth| depth > MAX_DEPTH) {
            return Err(ConfigError::Validation(format!(
                "ai.depth must be <= {MAX_DEPTH}"
            )));
        }
        Ok(())
    }
}
