//! Static position evaluation
//!
//! Scores are signed from one side's perspective and symmetric:
//! `evaluate(b, s) == -evaluate(b, s.opponent())`. Negamax relies on this.

pub mod connect;
pub mod material;

use crate::board::{Board, GameKind, Side};

// Re-exports
pub use connect::{connect_score, WindowScore};
pub use material::{material, piece_value};

/// Score of a decided game. Dominates every static score.
pub const WIN_SCORE: i32 = 100_000;

/// Evaluate `board` for `side`.
///
/// Positive values favour `side`. Pure function of the board.
#[must_use]
pub fn evaluate(board: &Board, side: Side) -> i32 {
    match board.kind() {
        GameKind::ConnectFour => connect_score(board, side),
        GameKind::Chess => material(board, side),
    }
}
