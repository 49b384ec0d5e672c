//! Score totals fed by game outcomes
//!
//! The engine only reports outcomes through [`Status`]; this module turns
//! them into running totals. [`ScoreStore`] persists the totals as JSON and
//! is used by the binary, never by the engine itself.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{GameKind, Side};
use crate::error::ScoreError;
use crate::rules::Status;

/// Fixed store key for a game kind
pub fn score_key(kind: GameKind) -> &'static str {
    match kind {
        GameKind::ConnectFour => "connect4_scores",
        GameKind::Chess => "chess_scores",
    }
}

/// Win and draw totals for one game kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoreboard {
    pub white: u32,
    pub black: u32,
    pub draws: u32,
}

impl Scoreboard {
    /// Count a terminal status. Returns false for a game still in progress.
    pub fn record(&mut self, status: Status) -> bool {
        match status {
            Status::Win(Side::White) => self.white += 1,
            Status::Win(Side::Black) => self.black += 1,
            Status::Draw => self.draws += 1,
            Status::InProgress { .. } => return false,
        }
        true
    }

    pub fn games(&self) -> u32 {
        self.white + self.black + self.draws
    }
}

/// JSON file of scoreboards keyed by [`score_key`].
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
    boards: BTreeMap<String, Scoreboard>,
}

impl ScoreStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, ScoreError> {
        let boards = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            boards,
        })
    }

    /// Current totals for a game kind
    pub fn get(&self, kind: GameKind) -> Scoreboard {
        self.boards
            .get(score_key(kind))
            .copied()
            .unwrap_or_default()
    }

    /// Record an outcome for a game kind; in-progress statuses are ignored
    pub fn record(&mut self, kind: GameKind, status: Status) -> bool {
        let board = self.boards.entry(score_key(kind).to_string()).or_default();
        board.record(status)
    }

    /// Write the store back to its file
    pub fn save(&self) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.boards)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "scores saved");
        Ok(())
    }
}
