//! Fixed-depth negamax with alpha-beta pruning
//!
//! The searcher walks the tree in place: every child position is entered
//! through [`Board::simulate`], so the board is restored on every exit path
//! and callers never observe a half-searched position.

use tracing::trace;

use crate::board::{Board, Cell, GameKind, Move};
use crate::eval::{evaluate, piece_value, WIN_SCORE};
use crate::rules::{find_line, has_legal_chess_move, in_check, legal_moves};

const INF: i32 = WIN_SCORE * 2;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Move>,
    /// Score of the best move for the side to move
    pub score: i32,
    /// Depth searched
    pub depth: u8,
    /// Total nodes visited
    pub nodes: u64,
}

/// Whether `score` reports a forced win or loss rather than a static value
#[inline]
pub fn is_decisive(score: i32) -> bool {
    score.abs() >= WIN_SCORE - i32::from(u8::MAX)
}

/// Depth-limited negamax searcher.
///
/// Scores are from the perspective of the side to move. A decided game is
/// worth [`WIN_SCORE`] minus the ply at which it was reached, so shorter
/// wins and longer losses are preferred.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited by the last search
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `depth` plies from the current position.
    ///
    /// A depth of 0 is treated as 1. Returns no move when the side to move
    /// has none. The board is unchanged on return.
    pub fn search(&mut self, board: &mut Board, depth: u8) -> SearchResult {
        self.nodes = 0;
        let depth = depth.max(1);

        let mut moves = legal_moves(board);
        order_moves(board, &mut moves);

        let mut best_move = None;
        let mut best_score = -INF;
        let mut alpha = -INF;
        let beta = INF;

        for mv in moves {
            let score = {
                let mut child = board.simulate(mv);
                -self.negamax(&mut child, depth - 1, 1, -beta, -alpha)
            };
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        }

        trace!(depth, nodes = self.nodes, best_score, "search finished");

        SearchResult {
            best_move,
            score: if best_move.is_some() { best_score } else { 0 },
            depth,
            nodes: self.nodes,
        }
    }

    fn negamax(&mut self, board: &mut Board, depth: u8, ply: i32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let side = board.turn();

        if board.kind() == GameKind::ConnectFour {
            // Any line on the board was completed by the side that just moved
            if find_line(board).is_some() {
                return -(WIN_SCORE - ply);
            }
            if board.is_full() {
                return 0;
            }
        }

        if depth == 0 {
            // A mate delivered by the last searched move still counts as one
            if board.kind() == GameKind::Chess && !has_legal_chess_move(board) {
                return if in_check(board, side) {
                    -(WIN_SCORE - ply)
                } else {
                    0
                };
            }
            return evaluate(board, side);
        }

        let mut moves = legal_moves(board);
        if moves.is_empty() {
            // Only reachable in chess: checkmate or stalemate
            return if in_check(board, side) {
                -(WIN_SCORE - ply)
            } else {
                0
            };
        }
        order_moves(board, &mut moves);

        let mut best = -INF;
        for mv in moves {
            let score = {
                let mut child = board.simulate(mv);
                -self.negamax(&mut child, depth - 1, ply + 1, -beta, -alpha)
            };
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Order moves so the likely best are searched first.
///
/// Chess: promotions and captures of valuable pieces by cheap pieces first.
/// Connect four: center columns first.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    match board.kind() {
        GameKind::ConnectFour => {
            let cols = i32::from(board.cols());
            moves.sort_by_key(|mv| {
                let col = i32::from(mv.to.col);
                ((2 * col - (cols - 1)).abs(), col)
            });
        }
        GameKind::Chess => {
            moves.sort_by_cached_key(|mv| std::cmp::Reverse(chess_order_key(board, mv)));
        }
    }
}

fn chess_order_key(board: &Board, mv: &Move) -> i32 {
    let victim = match board.piece_at(mv.to) {
        Cell::Piece(piece) => piece_value(piece.kind) * 10,
        _ => 0,
    };
    let attacker = mv
        .from
        .and_then(|from| board.piece_at(from).piece())
        .map_or(0, |piece| piece_value(piece.kind).min(10));
    let promotion = mv.promotion.map_or(0, piece_value);
    if victim > 0 {
        victim - attacker + promotion
    } else {
        promotion
    }
}
