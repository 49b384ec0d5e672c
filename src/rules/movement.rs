//! Chess movement geometry
//!
//! Decides whether a piece could travel from one square to another given
//! only the board contents: path blocking, pawn direction, capture rules.
//! King safety is handled separately in [`super::check`].

use crate::board::{Board, Cell, Pos, PieceKind, Side};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_RAYS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_RAYS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Row delta of a pawn step for `side`
#[inline]
fn pawn_direction(side: Side) -> i32 {
    match side {
        Side::White => -1,
        Side::Black => 1,
    }
}

#[inline]
fn pawn_start_row(board: &Board, side: Side) -> u8 {
    match side {
        Side::White => board.rows() - 2,
        Side::Black => 1,
    }
}

/// Whether the piece on `from` may move to `to` by its movement rule.
///
/// Ignores whether the move exposes the mover's king. Capturing a piece of
/// one's own side is never geometric.
pub fn is_geometric_move(board: &Board, from: Pos, to: Pos) -> bool {
    let Cell::Piece(piece) = board.piece_at(from) else {
        return false;
    };
    if !board.contains(to) || from == to {
        return false;
    }
    if board.piece_at(to).side() == Some(piece.side) {
        return false;
    }

    let dr = i32::from(to.row) - i32::from(from.row);
    let dc = i32::from(to.col) - i32::from(from.col);

    match piece.kind {
        PieceKind::Pawn => pawn_move(board, from, to, piece.side),
        PieceKind::Knight => knight_move(dr, dc),
        PieceKind::Bishop => bishop_move(board, from, to),
        PieceKind::Rook => rook_move(board, from, to),
        PieceKind::Queen => rook_move(board, from, to) || bishop_move(board, from, to),
        PieceKind::King => king_move(board, from, to, piece.side),
    }
}

fn pawn_move(board: &Board, from: Pos, to: Pos, side: Side) -> bool {
    let direction = pawn_direction(side);
    let dr = i32::from(to.row) - i32::from(from.row);
    let dc = i32::from(to.col) - i32::from(from.col);
    let target = board.piece_at(to);

    if dc == 0 {
        if dr == direction && target.is_empty() {
            return true;
        }
        if from.row == pawn_start_row(board, side) && dr == 2 * direction && target.is_empty() {
            return from
                .offset(direction, 0)
                .is_some_and(|mid| board.is_empty(mid));
        }
        return false;
    }

    // Diagonal step is capture-only
    dc.abs() == 1 && dr == direction && target.side().is_some()
}

#[inline]
fn knight_move(dr: i32, dc: i32) -> bool {
    (dr.abs() == 2 && dc.abs() == 1) || (dr.abs() == 1 && dc.abs() == 2)
}

fn rook_move(board: &Board, from: Pos, to: Pos) -> bool {
    (from.row == to.row || from.col == to.col) && path_clear(board, from, to)
}

fn bishop_move(board: &Board, from: Pos, to: Pos) -> bool {
    let dr = i32::from(to.row) - i32::from(from.row);
    let dc = i32::from(to.col) - i32::from(from.col);
    dr.abs() == dc.abs() && path_clear(board, from, to)
}

fn king_move(board: &Board, from: Pos, to: Pos, side: Side) -> bool {
    let dr = (i32::from(to.row) - i32::from(from.row)).abs();
    let dc = (i32::from(to.col) - i32::from(from.col)).abs();
    if dr <= 1 && dc <= 1 {
        return true;
    }
    if dr == 0 && dc == 2 {
        return can_castle(board, from, to, side);
    }
    false
}

/// Castling is not supported; a king's two-square step is never legal.
fn can_castle(_board: &Board, _from: Pos, _to: Pos, _side: Side) -> bool {
    false
}

/// Every square strictly between `from` and `to` is empty.
///
/// Only meaningful for squares on a shared rank, file or diagonal.
pub fn path_clear(board: &Board, from: Pos, to: Pos) -> bool {
    let dr = (i32::from(to.row) - i32::from(from.row)).signum();
    let dc = (i32::from(to.col) - i32::from(from.col)).signum();

    let mut cursor = from.offset(dr, dc);
    while let Some(pos) = cursor {
        if pos == to {
            return true;
        }
        if !board.is_empty(pos) {
            return false;
        }
        cursor = pos.offset(dr, dc);
    }
    false
}

/// Cheap superset of squares the piece on `from` could reach.
///
/// Every candidate still has to pass [`is_geometric_move`].
pub fn candidate_destinations(board: &Board, from: Pos) -> Vec<Pos> {
    let Cell::Piece(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    let mut targets = Vec::with_capacity(16);
    match piece.kind {
        PieceKind::Pawn => {
            let d = pawn_direction(piece.side);
            jump(board, from, &[(d, 0), (2 * d, 0), (d, -1), (d, 1)], &mut targets);
        }
        PieceKind::Knight => jump(board, from, &KNIGHT_OFFSETS, &mut targets),
        PieceKind::King => jump(board, from, &KING_OFFSETS, &mut targets),
        PieceKind::Bishop => slide(board, from, &BISHOP_RAYS, &mut targets),
        PieceKind::Rook => slide(board, from, &ROOK_RAYS, &mut targets),
        PieceKind::Queen => {
            slide(board, from, &ROOK_RAYS, &mut targets);
            slide(board, from, &BISHOP_RAYS, &mut targets);
        }
    }
    targets
}

fn jump(board: &Board, from: Pos, offsets: &[(i32, i32)], targets: &mut Vec<Pos>) {
    targets.extend(
        offsets
            .iter()
            .filter_map(|&(dr, dc)| from.offset(dr, dc))
            .filter(|&pos| board.contains(pos)),
    );
}

/// Walk each ray until the edge, stopping on (and including) the first
/// occupied square
fn slide(board: &Board, from: Pos, rays: &[(i32, i32)], targets: &mut Vec<Pos>) {
    for &(dr, dc) in rays {
        let mut cursor = from.offset(dr, dc);
        while let Some(pos) = cursor.filter(|&p| board.contains(p)) {
            targets.push(pos);
            if !board.is_empty(pos) {
                break;
            }
            cursor = pos.offset(dr, dc);
        }
    }
}
