use std::path::PathBuf;

use crate::board::Pos;

/// Errors reported by the game engine to its caller.
///
/// All of them are recoverable: the engine state is unchanged whenever one
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("illegal move")]
    IllegalMove,

    #[error("position {0} is outside the board")]
    OutOfRange(Pos),

    #[error("no move to undo")]
    NoHistory,

    #[error("game is already over")]
    GameOver,

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while reading or writing the score file.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
