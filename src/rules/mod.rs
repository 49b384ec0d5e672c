//! Game rules for connect four and chess
//!
//! This module implements both rule sets behind one dispatching surface:
//! - Gravity drops and the four-in-a-row scan ([`connect`])
//! - Chess movement geometry ([`movement`])
//! - King safety and legal move enumeration ([`check`])
//! - Win, checkmate, stalemate and draw detection ([`status`])

pub mod check;
pub mod connect;
pub mod movement;
pub mod status;

use crate::board::{Board, GameKind, Move, Pos};

// Re-exports for convenient access
pub use check::{
    has_legal_chess_move, in_check, is_attacked, is_checkmate, is_legal_chess, is_stalemate,
    legal_chess_moves, legal_moves_from,
};
pub use connect::{drop_move, find_line, legal_drops, line_through, winning_columns, WIN_LENGTH};
pub use movement::is_geometric_move;
pub use status::{status, Status};

/// Whether `mv` is legal for the side to move.
///
/// The board is unchanged on return.
pub fn is_legal(board: &mut Board, mv: Move) -> bool {
    match board.kind() {
        GameKind::ConnectFour => connect::is_legal_drop(board, mv),
        GameKind::Chess => is_legal_chess(board, mv),
    }
}

/// Every legal move for the side to move
pub fn legal_moves(board: &mut Board) -> Vec<Move> {
    match board.kind() {
        GameKind::ConnectFour => legal_drops(board),
        GameKind::Chess => legal_chess_moves(board),
    }
}

/// Squares reachable from `pos` by the side to move.
///
/// Chess: destinations of the piece on `pos`, deduplicated across
/// promotion choices. Connect four: the landing cell of `pos`'s column.
pub fn legal_destinations(board: &mut Board, pos: Pos) -> Vec<Pos> {
    match board.kind() {
        GameKind::ConnectFour => drop_move(board, pos.col)
            .map(|mv| vec![mv.to])
            .unwrap_or_default(),
        GameKind::Chess => {
            let mut targets: Vec<Pos> = legal_moves_from(board, pos)
                .into_iter()
                .map(|mv| mv.to)
                .collect();
            targets.dedup();
            targets
        }
    }
}
