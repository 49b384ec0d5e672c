//! Window heuristic for connect four
//!
//! Every run of [`WIN_LENGTH`] cells on the board is a window. Windows that
//! still hold only one side's discs score for that side; mixed windows are
//! dead and score nothing. Discs in the center column(s) get a small bonus.

use crate::board::{Board, Pos, Side};
use crate::rules::WIN_LENGTH;

/// Window scoring weights
pub struct WindowScore;

impl WindowScore {
    /// Three discs and one empty cell
    pub const THREE: i32 = 50;
    /// Two discs and two empty cells
    pub const TWO: i32 = 10;
    /// Per disc in a center column
    pub const CENTER: i32 = 3;
}

/// Window directions: horizontal, vertical, both diagonals
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Score a single window from its disc counts
#[inline]
fn score_window(own: usize, opp: usize) -> i32 {
    let empty = WIN_LENGTH - own - opp;
    match (own, opp, empty) {
        (3, 0, 1) => WindowScore::THREE,
        (2, 0, 2) => WindowScore::TWO,
        (0, 3, 1) => -WindowScore::THREE,
        (0, 2, 2) => -WindowScore::TWO,
        _ => 0,
    }
}

/// Columns that count as the center: one on odd widths, two on even
fn center_columns(cols: u8) -> std::ops::RangeInclusive<u8> {
    if cols % 2 == 1 {
        cols / 2..=cols / 2
    } else {
        cols / 2 - 1..=cols / 2
    }
}

/// Heuristic value of a connect board for `side`
#[must_use]
pub fn connect_score(board: &Board, side: Side) -> i32 {
    let mut score = 0;

    for col in center_columns(board.cols()) {
        for row in 0..board.rows() {
            match board.piece_at(Pos::new(row, col)).side() {
                Some(owner) if owner == side => score += WindowScore::CENTER,
                Some(_) => score -= WindowScore::CENTER,
                None => {}
            }
        }
    }

    for start in board.positions() {
        for &(dr, dc) in &DIRECTIONS {
            let mut own = 0;
            let mut opp = 0;
            let mut complete = true;
            for step in 0..WIN_LENGTH as i32 {
                let Some(pos) = start.offset(dr * step, dc * step).filter(|&p| board.contains(p))
                else {
                    complete = false;
                    break;
                };
                match board.piece_at(pos).side() {
                    Some(owner) if owner == side => own += 1,
                    Some(_) => opp += 1,
                    None => {}
                }
            }
            if complete {
                score += score_window(own, opp);
            }
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameKind;

    #[test]
    fn test_empty_board_scores_zero() {
        let board = Board::new(GameKind::ConnectFour);
        assert_eq!(connect_score(&board, Side::White), 0);
    }

    #[test]
    fn test_center_disc_is_worth_more() {
        let center = Board::from_layout(
            GameKind::ConnectFour,
            &[".......", ".......", ".......", ".......", ".......", "...X..."],
            Side::Black,
        )
        .unwrap();
        let edge = Board::from_layout(
            GameKind::ConnectFour,
            &[".......", ".......", ".......", ".......", ".......", "X......"],
            Side::Black,
        )
        .unwrap();
        assert!(connect_score(&center, Side::White) > connect_score(&edge, Side::White));
    }

    #[test]
    fn test_open_three_scores_for_owner() {
        let board = Board::from_layout(
            GameKind::ConnectFour,
            &[".......", ".......", ".......", ".......", ".......", "XXX...."],
            Side::Black,
        )
        .unwrap();
        assert!(connect_score(&board, Side::White) >= WindowScore::THREE);
    }

    #[test]
    fn test_score_is_symmetric() {
        let board = Board::from_layout(
            GameKind::ConnectFour,
            &[".......", ".......", ".......", "...O...", "..XX...", ".OXOX.."],
            Side::Black,
        )
        .unwrap();
        assert_eq!(
            connect_score(&board, Side::White),
            -connect_score(&board, Side::Black)
        );
    }

    #[test]
    fn test_even_width_has_two_center_columns() {
        assert_eq!(center_columns(6), 2..=3);
        assert_eq!(center_columns(7), 3..=3);
    }
}
