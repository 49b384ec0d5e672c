//! Board representation shared by the connect-four and chess rule sets

pub mod board;
pub mod piece;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Re-exports
pub use board::{Board, MoveRecord, Simulation};
pub use piece::{Cell, Piece, PieceKind};

/// Chess board edge length (8x8)
pub const CHESS_SIZE: u8 = 8;
/// Default connect-four geometry (7 columns x 6 rows)
pub const CONNECT_COLUMNS: u8 = 7;
pub const CONNECT_ROWS: u8 = 6;
/// Accepted range for either connect-four dimension
pub const MIN_CONNECT_SIZE: u8 = 4;
pub const MAX_CONNECT_SIZE: u8 = 16;

/// Which rule set a board is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    /// Gravity-filled drop game, four in a row wins
    ConnectFour,
    /// 8x8 chess without castling or en passant
    Chess,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::ConnectFour => write!(f, "connect_four"),
            GameKind::Chess => write!(f, "chess"),
        }
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "connect_four" | "connect-four" | "connect4" | "connect" => Ok(GameKind::ConnectFour),
            "chess" => Ok(GameKind::Chess),
            other => Err(format!("unknown game kind: {other}")),
        }
    }
}

/// Side to move. White always moves first; in connect four White is player 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Get opponent side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Position on the board. Row 0 is the top edge in both games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Step by a signed delta. `None` if either coordinate goes negative.
    ///
    /// Bounds against a particular board are checked with [`Board::contains`].
    #[inline]
    pub fn offset(self, dr: i32, dc: i32) -> Option<Pos> {
        let r = i32::from(self.row) + dr;
        let c = i32::from(self.col) + dc;
        if (0..=i32::from(u8::MAX)).contains(&r) && (0..=i32::from(u8::MAX)).contains(&c) {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }

    /// Parse a chess square name such as `"e4"`.
    pub fn from_algebraic(name: &str) -> Option<Pos> {
        let bytes = name.trim().as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Pos::new(CHESS_SIZE - (rank - b'0'), file - b'a'))
    }

    /// Chess square name of this position (only meaningful on an 8x8 board).
    pub fn to_algebraic(self) -> String {
        let file = char::from(b'a' + self.col);
        let rank = CHESS_SIZE.saturating_sub(self.row);
        format!("{file}{rank}")
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A move request.
///
/// Drops have no origin. Chess moves carry an origin and, when a pawn
/// reaches the far rank, an optional promotion kind (queen if omitted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Option<Pos>,
    pub to: Pos,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Drop a disc onto `to`
    #[inline]
    pub const fn drop(to: Pos) -> Self {
        Self {
            from: None,
            to,
            promotion: None,
        }
    }

    /// Move the piece on `from` to `to`
    #[inline]
    pub const fn step(from: Pos, to: Pos) -> Self {
        Self {
            from: Some(from),
            to,
            promotion: None,
        }
    }

    /// Pawn move that promotes to `kind`
    #[inline]
    pub const fn promote(from: Pos, to: Pos, kind: PieceKind) -> Self {
        Self {
            from: Some(from),
            to,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            None => write!(f, "drop@{}", self.to.col),
            Some(from) => {
                write!(f, "{}{}", from.to_algebraic(), self.to.to_algebraic())?;
                if let Some(kind) = self.promotion {
                    write!(f, "={}", kind.letter().to_ascii_uppercase())?;
                }
                Ok(())
            }
        }
    }
}
