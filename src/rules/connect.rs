//! Connect-four rules: gravity drops and the four-in-a-row scan

use crate::board::{Board, Move, Pos, Side};

/// Discs in a row needed to win
pub const WIN_LENGTH: usize = 4;

/// Direction vectors for line checking (4 axes, scanned both ways)
const DIRECTIONS: [(i32, i32); 4] = [
    (1, 0),  // Vertical
    (0, 1),  // Horizontal
    (1, 1),  // Diagonal SE
    (-1, 1), // Diagonal NE
];

/// Drop into `col` for the side to move, if the column has room
pub fn drop_move(board: &Board, col: u8) -> Option<Move> {
    board
        .lowest_open_row(col)
        .map(|row| Move::drop(Pos::new(row, col)))
}

/// A drop is legal iff it lands on the gravity-resolved cell of its column
pub fn is_legal_drop(board: &Board, mv: Move) -> bool {
    mv.from.is_none()
        && board.contains(mv.to)
        && board.lowest_open_row(mv.to.col) == Some(mv.to.row)
}

/// Every legal drop, left to right
pub fn legal_drops(board: &Board) -> Vec<Move> {
    (0..board.cols())
        .filter_map(|col| drop_move(board, col))
        .collect()
}

/// Cells of a winning line passing through `pos`, if the disc there
/// completes one.
pub fn line_through(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let owner = board.piece_at(pos).side()?;

    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![pos];

        // Negative direction first so the line reads in order
        let mut cursor = pos.offset(-dr, -dc);
        while let Some(prev) = cursor.filter(|&p| board.piece_at(p).side() == Some(owner)) {
            line.insert(0, prev);
            cursor = prev.offset(-dr, -dc);
        }

        let mut cursor = pos.offset(dr, dc);
        while let Some(next) = cursor.filter(|&p| board.piece_at(p).side() == Some(owner)) {
            line.push(next);
            cursor = next.offset(dr, dc);
        }

        if line.len() >= WIN_LENGTH {
            return Some(line);
        }
    }
    None
}

/// Scan the whole board for a winning line.
///
/// Returns the owner and the line's cells.
pub fn find_line(board: &Board) -> Option<(Side, Vec<Pos>)> {
    board.positions().find_map(|pos| {
        let owner = board.piece_at(pos).side()?;
        line_through(board, pos).map(|line| (owner, line))
    })
}

/// Columns where the side to move would complete a line right now
pub fn winning_columns(board: &mut Board) -> Vec<u8> {
    let mut columns = Vec::new();
    for mv in legal_drops(board) {
        let sim = board.simulate(mv);
        if line_through(&sim, mv.to).is_some() {
            columns.push(mv.to.col);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameKind;

    fn play(board: &mut Board, columns: &[u8]) {
        for &col in columns {
            let mv = drop_move(board, col).unwrap();
            board.apply(mv);
        }
    }

    #[test]
    fn test_drop_lands_on_bottom() {
        let board = Board::new(GameKind::ConnectFour);
        let mv = drop_move(&board, 3).unwrap();
        assert_eq!(mv.to, Pos::new(5, 3));
        assert!(is_legal_drop(&board, mv));
    }

    #[test]
    fn test_drop_must_respect_gravity() {
        let board = Board::new(GameKind::ConnectFour);
        assert!(!is_legal_drop(&board, Move::drop(Pos::new(2, 3))));
        assert!(!is_legal_drop(&board, Move::drop(Pos::new(5, 9))));
        assert!(!is_legal_drop(
            &board,
            Move::step(Pos::new(5, 2), Pos::new(5, 3))
        ));
    }

    #[test]
    fn test_full_column_has_no_drop() {
        let mut board = Board::new(GameKind::ConnectFour);
        play(&mut board, &[0, 0, 0, 0, 0, 0]);
        assert!(drop_move(&board, 0).is_none());
        assert_eq!(legal_drops(&board).len(), 6);
    }

    #[test]
    fn test_vertical_line() {
        let mut board = Board::new(GameKind::ConnectFour);
        play(&mut board, &[3, 4, 3, 4, 3, 4, 3]);
        let line = line_through(&board, Pos::new(2, 3)).unwrap();
        assert_eq!(line.len(), 4);
        assert_eq!(find_line(&board).map(|(side, _)| side), Some(Side::White));
    }

    #[test]
    fn test_horizontal_line() {
        let mut board = Board::new(GameKind::ConnectFour);
        play(&mut board, &[0, 0, 1, 1, 2, 2, 3]);
        let line = line_through(&board, Pos::new(5, 3)).unwrap();
        assert_eq!(
            line,
            vec![Pos::new(5, 0), Pos::new(5, 1), Pos::new(5, 2), Pos::new(5, 3)]
        );
    }

    #[test]
    fn test_diagonal_line() {
        let board = Board::from_layout(
            GameKind::ConnectFour,
            &[
                ".......", ".......", "...X...", "..XO...", ".XOO...", "XOOX...",
            ],
            Side::Black,
        )
        .unwrap();
        let line = line_through(&board, Pos::new(2, 3)).unwrap();
        assert_eq!(line.len(), 4);
        assert_eq!(line[0], Pos::new(5, 0));
    }

    #[test]
    fn test_three_is_not_a_line() {
        let mut board = Board::new(GameKind::ConnectFour);
        play(&mut board, &[0, 0, 1, 1, 2]);
        assert!(line_through(&board, Pos::new(5, 2)).is_none());
        assert!(find_line(&board).is_none());
    }

    #[test]
    fn test_empty_cell_has_no_line() {
        let board = Board::new(GameKind::ConnectFour);
        assert!(line_through(&board, Pos::new(5, 0)).is_none());
    }

    #[test]
    fn test_winning_columns_leaves_board_untouched() {
        let mut board = Board::new(GameKind::ConnectFour);
        play(&mut board, &[0, 6, 1, 6, 2, 5]);
        let before = board.clone();
        assert_eq!(winning_columns(&mut board), vec![3]);
        assert_eq!(board, before);
    }
}
