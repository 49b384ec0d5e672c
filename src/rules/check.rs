//! King safety: attack detection, self-check filtering, and legal chess
//! move enumeration
//!
//! Every legality query that must account for check runs the same
//! discipline: simulate the move, ask whether the mover's king is attacked,
//! and let the simulation guard revert the board.

use crate::board::{Board, Cell, Move, PieceKind, Pos, Side};

use super::movement::{candidate_destinations, is_geometric_move};

/// Whether any piece of `by` could move onto `target` by its movement rule.
///
/// The attacker's own king safety is ignored; attacking is not moving.
/// Pawns only count against occupied squares, so empty squares are tested
/// by simulating a move onto them first.
pub fn is_attacked(board: &Board, target: Pos, by: Side) -> bool {
    board
        .pieces(by)
        .any(|(from, _)| is_geometric_move(board, from, target))
}

/// Whether `side`'s king is attacked. A side without a king is never in check.
pub fn in_check(board: &Board, side: Side) -> bool {
    board
        .find_king(side)
        .is_some_and(|king| is_attacked(board, king, side.opponent()))
}

/// Simulate `mv` and report whether the mover's king is safe afterwards
fn keeps_king_safe(board: &mut Board, mv: Move) -> bool {
    let mover = board.turn();
    let sim = board.simulate(mv);
    !in_check(&sim, mover)
}

/// Whether a pawn arriving on `to` from `from` promotes
fn is_promotion(board: &Board, from: Pos, to: Pos) -> bool {
    match board.piece_at(from) {
        Cell::Piece(piece) => {
            piece.kind == PieceKind::Pawn && to.row == board.promotion_row(piece.side)
        }
        _ => false,
    }
}

/// Full legality of a chess move for the side to move
pub fn is_legal_chess(board: &mut Board, mv: Move) -> bool {
    let Some(from) = mv.from else {
        return false;
    };
    match board.piece_at(from) {
        Cell::Piece(piece) if piece.side == board.turn() => {}
        _ => return false,
    }
    if !is_geometric_move(board, from, mv.to) {
        return false;
    }
    // A promotion kind on a non-promoting move is ignored by apply
    if is_promotion(board, from, mv.to)
        && mv.promotion.is_some_and(|kind| !kind.is_promotion_target())
    {
        return false;
    }
    keeps_king_safe(board, mv)
}

/// Legal moves of the piece on `from`, one entry per promotion choice
pub fn legal_moves_from(board: &mut Board, from: Pos) -> Vec<Move> {
    match board.piece_at(from) {
        Cell::Piece(piece) if piece.side == board.turn() => {}
        _ => return Vec::new(),
    }

    let mut moves = Vec::new();
    for to in candidate_destinations(board, from) {
        if !is_geometric_move(board, from, to) {
            continue;
        }
        if is_promotion(board, from, to) {
            for kind in PieceKind::PROMOTIONS {
                let mv = Move::promote(from, to, kind);
                if keeps_king_safe(board, mv) {
                    moves.push(mv);
                }
            }
        } else {
            let mv = Move::step(from, to);
            if keeps_king_safe(board, mv) {
                moves.push(mv);
            }
        }
    }
    moves
}

/// Every legal chess move for the side to move
pub fn legal_chess_moves(board: &mut Board) -> Vec<Move> {
    let origins: Vec<Pos> = board.pieces(board.turn()).map(|(pos, _)| pos).collect();
    origins
        .into_iter()
        .flat_map(|from| legal_moves_from(board, from))
        .collect()
}

/// Whether the side to move has at least one legal chess move.
///
/// Stops at the first one found.
pub fn has_legal_chess_move(board: &mut Board) -> bool {
    let origins: Vec<Pos> = board.pieces(board.turn()).map(|(pos, _)| pos).collect();
    for from in origins {
        for to in candidate_destinations(board, from) {
            if is_geometric_move(board, from, to) && keeps_king_safe(board, Move::step(from, to)) {
                return true;
            }
        }
    }
    false
}

/// Side to move is in check and has no legal move
pub fn is_checkmate(board: &mut Board) -> bool {
    in_check(board, board.turn()) && !has_legal_chess_move(board)
}

/// Side to move is not in check and has no legal move
pub fn is_stalemate(board: &mut Board) -> bool {
    !in_check(board, board.turn()) && !has_legal_chess_move(board)
}
