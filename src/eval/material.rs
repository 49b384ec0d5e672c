//! Chess material count

use crate::board::{Board, PieceKind, Side};

/// Material value of a piece kind.
///
/// The king's value is a large finite sentinel so sums never overflow.
#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 100,
    }
}

/// Material of `side` minus material of its opponent
#[must_use]
pub fn material(board: &Board, side: Side) -> i32 {
    let own: i32 = board.pieces(side).map(|(_, p)| piece_value(p.kind)).sum();
    let theirs: i32 = board
        .pieces(side.opponent())
        .map(|(_, p)| piece_value(p.kind))
        .sum();
    own - theirs
}
