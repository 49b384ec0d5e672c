//! Shallow tactical tiers
//!
//! These run ahead of the full search: take a win when one is on the board,
//! stop the opponent's, set up double threats, and the cheap heuristics
//! used when no search depth is configured. Every lookahead goes through
//! [`Board::simulate`] and leaves the board as it found it.

use rand::Rng;

use crate::board::{Board, Cell, GameKind, Move, PieceKind};
use crate::eval::{material, piece_value};
use crate::rules::{drop_move, in_check, legal_drops, legal_moves, status, winning_columns, Status};

use super::minimax::order_moves;

/// Greedy scoring weights for chess moves
pub struct GreedyScore;

impl GreedyScore {
    /// Multiplier on the captured piece's value
    pub const CAPTURE: i32 = 10;
    pub const PROMOTION: i32 = 8;
    pub const CHECK: i32 = 5;
    pub const MATE: i32 = 1000;
}

/// A legal move that ends the game in the mover's favour right now
pub fn find_immediate_win(board: &mut Board) -> Option<Move> {
    let mover = board.turn();
    let mut moves = legal_moves(board);
    order_moves(board, &mut moves);
    moves.into_iter().find(|&mv| {
        let mut sim = board.simulate(mv);
        status(&mut sim) == Status::Win(mover)
    })
}

/// A move that stops the opponent's immediate win.
///
/// Connect four: drop into the opponent's winning column. Chess: when the
/// opponent threatens mate in one, the first move (in search order) after
/// which no mate in one remains. `None` when there is nothing to stop, or
/// nothing that stops it.
pub fn find_block(board: &mut Board) -> Option<Move> {
    let opponent = board.turn().opponent();
    match board.kind() {
        GameKind::ConnectFour => {
            let mut scratch = board.with_turn(opponent);
            let threats = winning_columns(&mut scratch);
            threats.first().and_then(|&col| drop_move(board, col))
        }
        GameKind::Chess => {
            // Check evasion is already forced by legality
            if in_check(board, board.turn()) {
                return None;
            }
            let mut scratch = board.with_turn(opponent);
            find_immediate_win(&mut scratch)?;

            let mut moves = legal_moves(board);
            order_moves(board, &mut moves);
            moves.into_iter().find(|&mv| {
                let mut sim = board.simulate(mv);
                find_immediate_win(&mut sim).is_none()
            })
        }
    }
}

/// Connect four: a drop that leaves two or more distinct winning columns
/// for the mover while giving the opponent no immediate win.
pub fn find_double_threat(board: &mut Board) -> Option<Move> {
    if board.kind() != GameKind::ConnectFour {
        return None;
    }
    let mover = board.turn();
    let mut moves = legal_drops(board);
    order_moves(board, &mut moves);
    moves.into_iter().find(|&mv| {
        let mut sim = board.simulate(mv);
        if !winning_columns(&mut sim).is_empty() {
            return false;
        }
        let mut ours = sim.with_turn(mover);
        winning_columns(&mut ours).len() >= 2
    })
}

/// Connect four: the most central drop that does not hand the opponent an
/// immediate win, or the most central drop if every one does.
pub fn center_move(board: &mut Board) -> Option<Move> {
    let mut moves = legal_drops(board);
    order_moves(board, &mut moves);
    let safe = moves.iter().copied().find(|&mv| {
        let mut sim = board.simulate(mv);
        winning_columns(&mut sim).is_empty()
    });
    safe.or_else(|| moves.first().copied())
}

/// One-ply score of a chess move for the side to move.
///
/// Captures, promotions, checks and mates earn bonuses on top of the
/// material balance after the move.
pub fn greedy_score(board: &mut Board, mv: Move) -> i32 {
    let mover = board.turn();
    let mut score = 0;

    if let Cell::Piece(target) = board.piece_at(mv.to) {
        score += piece_value(target.kind) * GreedyScore::CAPTURE;
    }
    let promotes = mv
        .from
        .and_then(|from| board.piece_at(from).piece())
        .is_some_and(|piece| {
            piece.kind == PieceKind::Pawn && mv.to.row == board.promotion_row(piece.side)
        });
    if promotes {
        score += GreedyScore::PROMOTION;
    }

    let mut sim = board.simulate(mv);
    match status(&mut sim) {
        Status::Win(side) if side == mover => score += GreedyScore::MATE + GreedyScore::CHECK,
        Status::InProgress { check: true } => score += GreedyScore::CHECK,
        _ => {}
    }
    score + material(&sim, mover)
}

/// Highest greedy-scoring chess move, ties broken at random
pub fn greedy_move<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<(Move, i32)> {
    let scored: Vec<(Move, i32)> = legal_moves(board)
        .into_iter()
        .map(|mv| (mv, greedy_score(board, mv)))
        .collect();
    let best = scored.iter().map(|&(_, score)| score).max()?;
    let top: Vec<Move> = scored
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|&(mv, _)| mv)
        .collect();
    let pick = top[rng.random_range(0..top.len())];
    Some((pick, best))
}

/// Uniformly random legal move
pub fn random_move<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<Move> {
    let moves = legal_moves(board);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.random_range(0..moves.len())])
}
