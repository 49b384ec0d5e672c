use super::*;

#[test]
fn test_side_opponent() {
    assert_eq!(Side::White.opponent(), Side::Black);
    assert_eq!(Side::Black.opponent(), Side::White);
}

#[test]
fn test_pos_offset() {
    let pos = Pos::new(3, 3);
    assert_eq!(pos.offset(1, -1), Some(Pos::new(4, 2)));
    assert_eq!(Pos::new(0, 0).offset(-1, 0), None);
    assert_eq!(Pos::new(0, 0).offset(0, -1), None);
}

#[test]
fn test_pos_algebraic() {
    assert_eq!(Pos::from_algebraic("a8"), Some(Pos::new(0, 0)));
    assert_eq!(Pos::from_algebraic("e1"), Some(Pos::new(7, 4)));
    assert_eq!(Pos::from_algebraic("H1"), Some(Pos::new(7, 7)));
    assert_eq!(Pos::from_algebraic("i1"), None);
    assert_eq!(Pos::from_algebraic("a9"), None);
    assert_eq!(Pos::from_algebraic("e44"), None);
    assert_eq!(Pos::new(4, 4).to_algebraic(), "e4");
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
}

#[test]
fn test_game_kind_parse() {
    assert_eq!("chess".parse::<GameKind>(), Ok(GameKind::Chess));
    assert_eq!("connect4".parse::<GameKind>(), Ok(GameKind::ConnectFour));
    assert!("go".parse::<GameKind>().is_err());
}

#[test]
fn test_connect_board_starts_empty() {
    let board = Board::new(GameKind::ConnectFour);
    assert_eq!(board.cols(), CONNECT_COLUMNS);
    assert_eq!(board.rows(), CONNECT_ROWS);
    assert_eq!(board.occupied(), 0);
    assert_eq!(board.turn(), Side::White);
    assert_eq!(board.lowest_open_row(3), Some(CONNECT_ROWS - 1));
}

#[test]
fn test_chess_start_position() {
    let board = Board::new(GameKind::Chess);
    assert_eq!(board.occupied(), 32);
    assert_eq!(
        board.piece_at(Pos::from_algebraic("e1").unwrap()),
        Cell::Piece(Piece::new(Side::White, PieceKind::King))
    );
    assert_eq!(
        board.piece_at(Pos::from_algebraic("d8").unwrap()),
        Cell::Piece(Piece::new(Side::Black, PieceKind::Queen))
    );
    assert_eq!(board.find_king(Side::Black), Pos::from_algebraic("e8"));
}

#[test]
fn test_piece_at_out_of_range() {
    let board = Board::new(GameKind::Chess);
    assert_eq!(board.piece_at(Pos::new(8, 0)), Cell::OffBoard);
    assert_eq!(board.piece_at(Pos::new(0, 200)), Cell::OffBoard);
    assert!(!board.is_empty(Pos::new(9, 9)));
}

#[test]
fn test_lowest_open_row_fills_upward() {
    let mut board = Board::new(GameKind::ConnectFour);
    for expected in (0..CONNECT_ROWS).rev() {
        let row = board.lowest_open_row(2).unwrap();
        assert_eq!(row, expected);
        board.apply(Move::drop(Pos::new(row, 2)));
    }
    assert_eq!(board.lowest_open_row(2), None);
    assert!(board.is_column_full(2));
    assert_eq!(board.lowest_open_row(CONNECT_COLUMNS), None);
}

#[test]
fn test_apply_flips_turn_and_revert_restores() {
    let mut board = Board::new(GameKind::Chess);
    let before = board.clone();
    let mv = Move::step(
        Pos::from_algebraic("e2").unwrap(),
        Pos::from_algebraic("e4").unwrap(),
    );

    let record = board.apply(mv);
    assert_eq!(board.turn(), Side::Black);
    assert!(board.is_empty(Pos::from_algebraic("e2").unwrap()));
    assert_eq!(record.captured, Cell::Empty);

    board.revert(&record);
    assert_eq!(board, before);
}

#[test]
fn test_simulation_reverts_on_drop() {
    let mut board = Board::new(GameKind::ConnectFour);
    let before = board.clone();
    {
        let sim = board.simulate(Move::drop(Pos::new(5, 3)));
        assert_eq!(sim.piece_at(Pos::new(5, 3)), Cell::Disc(Side::White));
        assert_eq!(sim.turn(), Side::Black);
    }
    assert_eq!(board, before);
}

#[test]
fn test_nested_simulation() {
    let mut board = Board::new(GameKind::ConnectFour);
    let before = board.clone();
    {
        let mut outer = board.simulate(Move::drop(Pos::new(5, 0)));
        {
            let inner = outer.simulate(Move::drop(Pos::new(4, 0)));
            assert_eq!(inner.piece_at(Pos::new(4, 0)), Cell::Disc(Side::Black));
        }
        assert!(outer.is_empty(Pos::new(4, 0)));
    }
    assert_eq!(board, before);
}

#[test]
fn test_promotion_applies_and_reverts() {
    let mut board = Board::from_layout(
        GameKind::Chess,
        &[
            "....k...", ".P......", "........", "........", "........", "........", "........",
            "....K...",
        ],
        Side::White,
    )
    .unwrap();
    let before = board.clone();
    let from = Pos::from_algebraic("b7").unwrap();
    let to = Pos::from_algebraic("b8").unwrap();

    let record = board.apply(Move::step(from, to));
    assert_eq!(record.promoted, Some(PieceKind::Queen));
    assert_eq!(
        board.piece_at(to),
        Cell::Piece(Piece::new(Side::White, PieceKind::Queen))
    );

    board.revert(&record);
    assert_eq!(board, before);

    let record = board.apply(Move::promote(from, to, PieceKind::Knight));
    assert_eq!(
        board.piece_at(to),
        Cell::Piece(Piece::new(Side::White, PieceKind::Knight))
    );
    board.revert(&record);
    assert_eq!(board, before);
}

#[test]
fn test_layout_round_trips_through_display() {
    let layout = [".......", ".......", ".......", ".......", "...O...", "..XXO.."];
    let board = Board::from_layout(GameKind::ConnectFour, &layout, Side::White).unwrap();
    assert_eq!(board.to_string(), layout.join("\n"));
}

#[test]
fn test_layout_rejects_floating_disc() {
    let layout = [".......", ".......", ".......", ".......", "...X...", "......."];
    let result = Board::from_layout(GameKind::ConnectFour, &layout, Side::White);
    assert!(matches!(result, Err(crate::error::EngineError::InvalidLayout(_))));
}

#[test]
fn test_layout_rejects_bad_shapes() {
    assert!(Board::from_layout(GameKind::Chess, &["........"], Side::White).is_err());
    assert!(Board::from_layout(GameKind::ConnectFour, &[], Side::White).is_err());
    assert!(
        Board::from_layout(GameKind::ConnectFour, &["....", "...", "....", "...."], Side::White)
            .is_err()
    );
    assert!(
        Board::from_layout(GameKind::ConnectFour, &["....", "....", "....", "..Z."], Side::White)
            .is_err()
    );
}

#[test]
fn test_custom_connect_size() {
    let board = Board::connect_four(6, 6).unwrap();
    assert_eq!(board.cols(), 6);
    assert_eq!(board.rows(), 6);
    assert!(Board::connect_four(3, 6).is_err());
    assert!(Board::connect_four(7, 17).is_err());
}
