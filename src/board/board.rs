//! Board grid, side to move, and the apply/revert pair

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::{
    Cell, GameKind, Move, Piece, PieceKind, Pos, Side, CHESS_SIZE, CONNECT_COLUMNS, CONNECT_ROWS,
    MAX_CONNECT_SIZE, MIN_CONNECT_SIZE,
};
use crate::error::EngineError;

/// Standard chess starting position, Black's back rank first
const CHESS_START: [&str; 8] = [
    "rnbqkbnr",
    "pppppppp",
    "........",
    "........",
    "........",
    "........",
    "PPPPPPPP",
    "RNBQKBNR",
];

/// Game board: fixed-size grid plus the side to move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    kind: GameKind,
    rows: u8,
    cols: u8,
    cells: Vec<Cell>,
    turn: Side,
}

/// Record of an applied move, enough to reverse it exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The move as applied
    pub mv: Move,
    /// Side that made the move
    pub side: Side,
    /// Cell that left the origin (the dropped disc for drops)
    pub moved: Cell,
    /// Previous contents of the destination
    pub captured: Cell,
    /// Promotion applied on arrival, if any
    pub promoted: Option<PieceKind>,
}

impl Board {
    /// Starting position for the given game kind
    pub fn new(kind: GameKind) -> Self {
        match kind {
            GameKind::ConnectFour => Self::blank(kind, CONNECT_ROWS, CONNECT_COLUMNS),
            GameKind::Chess => {
                let mut board = Self::blank(kind, CHESS_SIZE, CHESS_SIZE);
                board.fill(&CHESS_START);
                board
            }
        }
    }

    /// Empty connect-four board with custom geometry
    pub fn connect_four(cols: u8, rows: u8) -> Result<Self, EngineError> {
        let range = MIN_CONNECT_SIZE..=MAX_CONNECT_SIZE;
        if !range.contains(&cols) || !range.contains(&rows) {
            return Err(EngineError::InvalidLayout(format!(
                "connect board must be between {MIN_CONNECT_SIZE} and {MAX_CONNECT_SIZE} on each side, got {cols}x{rows}"
            )));
        }
        Ok(Self::blank(GameKind::ConnectFour, rows, cols))
    }

    /// Build a position from text rows (top row first).
    ///
    /// Chess: `KQRBNP` white, `kqrbnp` black. Connect four: `X` white,
    /// `O` black. `.` is empty in both.
    pub fn from_layout(kind: GameKind, layout: &[&str], turn: Side) -> Result<Self, EngineError> {
        let rows = u8::try_from(layout.len())
            .map_err(|_| EngineError::InvalidLayout("too many rows".into()))?;
        let cols = layout
            .first()
            .map(|row| row.chars().count())
            .ok_or_else(|| EngineError::InvalidLayout("layout has no rows".into()))?;
        let cols = u8::try_from(cols)
            .map_err(|_| EngineError::InvalidLayout("too many columns".into()))?;

        let mut board = match kind {
            GameKind::Chess if rows != CHESS_SIZE || cols != CHESS_SIZE => {
                return Err(EngineError::InvalidLayout(format!(
                    "chess layout must be 8x8, got {cols}x{rows}"
                )));
            }
            GameKind::Chess => Self::blank(kind, rows, cols),
            GameKind::ConnectFour => Self::connect_four(cols, rows)?,
        };
        board.turn = turn;

        for (r, line) in layout.iter().enumerate() {
            if line.chars().count() != usize::from(cols) {
                return Err(EngineError::InvalidLayout(format!(
                    "row {r} has {} cells, expected {cols}",
                    line.chars().count()
                )));
            }
            for (c, glyph) in line.chars().enumerate() {
                let cell = Cell::from_glyph(kind, glyph).ok_or_else(|| {
                    EngineError::InvalidLayout(format!("unknown glyph '{glyph}' at row {r}"))
                })?;
                board.set(Pos::new(r as u8, c as u8), cell);
            }
        }

        if kind == GameKind::ConnectFour {
            board.check_gravity()?;
        }
        Ok(board)
    }

    fn blank(kind: GameKind, rows: u8, cols: u8) -> Self {
        Self {
            kind,
            rows,
            cols,
            cells: vec![Cell::Empty; usize::from(rows) * usize::from(cols)],
            turn: Side::White,
        }
    }

    fn fill(&mut self, layout: &[&str]) {
        for (r, line) in layout.iter().enumerate() {
            for (c, glyph) in line.chars().enumerate() {
                if let Some(cell) = Cell::from_glyph(self.kind, glyph) {
                    self.set(Pos::new(r as u8, c as u8), cell);
                }
            }
        }
    }

    /// Reject discs floating above an empty cell
    fn check_gravity(&self) -> Result<(), EngineError> {
        for col in 0..self.cols {
            let mut seen_disc = false;
            for row in 0..self.rows {
                let cell = self.piece_at(Pos::new(row, col));
                if !cell.is_empty() {
                    seen_disc = true;
                } else if seen_disc {
                    return Err(EngineError::InvalidLayout(format!(
                        "floating disc above empty cell at row {row}, column {col}"
                    )));
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    #[inline]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Side to move
    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Copy of this board with a different side to move.
    ///
    /// Used to ask "what could the opponent do from here" without
    /// touching the real turn order.
    pub(crate) fn with_turn(&self, turn: Side) -> Board {
        let mut scratch = self.clone();
        scratch.turn = turn;
        scratch
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos)
            .then(|| usize::from(pos.row) * usize::from(self.cols) + usize::from(pos.col))
    }

    /// Contents of a cell; `Cell::OffBoard` outside the grid
    #[inline]
    pub fn piece_at(&self, pos: Pos) -> Cell {
        self.index(pos).map_or(Cell::OffBoard, |idx| self.cells[idx])
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.piece_at(pos).is_empty()
    }

    #[inline]
    fn set(&mut self, pos: Pos, cell: Cell) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = cell;
        }
    }

    /// Gravity-resolved landing row for a column, `None` when the column is
    /// full or out of range
    pub fn lowest_open_row(&self, col: u8) -> Option<u8> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|&row| self.is_empty(Pos::new(row, col)))
    }

    /// A column is full once its top cell is occupied
    #[inline]
    pub fn is_column_full(&self, col: u8) -> bool {
        col >= self.cols || !self.is_empty(Pos::new(0, col))
    }

    /// Every column full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// All positions, row by row
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Pos::new(row, col)))
    }

    /// Chess pieces belonging to `side`
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.positions().filter_map(move |pos| match self.piece_at(pos) {
            Cell::Piece(piece) if piece.side == side => Some((pos, piece)),
            _ => None,
        })
    }

    /// Square of `side`'s king, if it has one
    pub fn find_king(&self, side: Side) -> Option<Pos> {
        self.pieces(side)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(pos, _)| pos)
    }

    /// Occupied cell count
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Row on which `side`'s pawns promote
    #[inline]
    pub fn promotion_row(&self, side: Side) -> u8 {
        match side {
            Side::White => 0,
            Side::Black => self.rows - 1,
        }
    }

    /// Apply a move and flip the turn.
    ///
    /// No legality check happens here; callers validate first (see
    /// [`crate::rules::is_legal`]). Returns the record needed by [`Board::revert`].
    pub fn apply(&mut self, mv: Move) -> MoveRecord {
        let side = self.turn;
        let captured = self.piece_at(mv.to);

        let record = match mv.from {
            None => {
                let disc = Cell::Disc(side);
                self.set(mv.to, disc);
                MoveRecord {
                    mv,
                    side,
                    moved: disc,
                    captured,
                    promoted: None,
                }
            }
            Some(from) => {
                let moved = self.piece_at(from);
                let promoted = match moved {
                    Cell::Piece(piece)
                        if piece.kind == PieceKind::Pawn
                            && mv.to.row == self.promotion_row(piece.side) =>
                    {
                        Some(mv.promotion.unwrap_or(PieceKind::Queen))
                    }
                    _ => None,
                };
                let landed = match (moved, promoted) {
                    (Cell::Piece(piece), Some(kind)) => Cell::Piece(Piece::new(piece.side, kind)),
                    _ => moved,
                };
                self.set(mv.to, landed);
                self.set(from, Cell::Empty);
                MoveRecord {
                    mv,
                    side,
                    moved,
                    captured,
                    promoted,
                }
            }
        };

        self.turn = side.opponent();
        record
    }

    /// Undo a move previously returned by [`Board::apply`].
    ///
    /// Records must be reverted in reverse order of application.
    pub fn revert(&mut self, record: &MoveRecord) {
        if let Some(from) = record.mv.from {
            self.set(from, record.moved);
        }
        self.set(record.mv.to, record.captured);
        self.turn = record.side;
    }

    /// Apply `mv` for the lifetime of the returned guard.
    ///
    /// The board is restored when the guard drops, on every exit path.
    pub fn simulate(&mut self, mv: Move) -> Simulation<'_> {
        let record = self.apply(mv);
        Simulation {
            board: self,
            record,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                write!(f, "{}", self.piece_at(Pos::new(row, col)).glyph())?;
            }
        }
        Ok(())
    }
}

/// Scoped simulation of one move; reverts on drop
pub struct Simulation<'a> {
    board: &'a mut Board,
    record: MoveRecord,
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Simulation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.revert(&self.record);
    }
}
