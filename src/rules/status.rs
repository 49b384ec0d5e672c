//! Terminal detection for both rule sets

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, GameKind, Side};

use super::check::{in_check, is_checkmate, is_stalemate};
use super::connect::find_line;

/// Outcome of the position as seen by the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Game continues. `check` is only ever set in chess.
    InProgress { check: bool },
    /// Four in a row, or checkmate delivered by this side
    Win(Side),
    /// Full connect board, or chess stalemate
    Draw,
}

impl Status {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress { .. })
    }

    #[inline]
    pub fn winner(self) -> Option<Side> {
        match self {
            Status::Win(side) => Some(side),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InProgress { check: true } => write!(f, "in progress (check)"),
            Status::InProgress { check: false } => write!(f, "in progress"),
            Status::Win(side) => write!(f, "{side} wins"),
            Status::Draw => write!(f, "draw"),
        }
    }
}

/// Classify the position.
///
/// Takes `&mut` because chess stalemate detection simulates candidate
/// moves; the board is unchanged on return.
pub fn status(board: &mut Board) -> Status {
    match board.kind() {
        GameKind::ConnectFour => {
            if let Some((side, _)) = find_line(board) {
                Status::Win(side)
            } else if board.is_full() {
                Status::Draw
            } else {
                Status::InProgress { check: false }
            }
        }
        GameKind::Chess => {
            let mover = board.turn();
            if is_checkmate(board) {
                Status::Win(mover.opponent())
            } else if is_stalemate(board) {
                Status::Draw
            } else {
                Status::InProgress {
                    check: in_check(board, mover),
                }
            }
        }
    }
}
