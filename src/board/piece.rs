//! Cell contents: connect discs and chess pieces

use super::{GameKind, Side};

/// Chess piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to, strongest first
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Lowercase letter used in layouts and move text
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub fn is_promotion_target(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }
}

/// A chess piece: side plus kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }
}

/// Contents of a board cell.
///
/// `OffBoard` is never stored; it is what `piece_at` answers for positions
/// outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Disc(Side),
    Piece(Piece),
    OffBoard,
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Owner of the disc or piece, if any
    #[inline]
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Disc(side) => Some(side),
            Cell::Piece(piece) => Some(piece.side),
            Cell::Empty | Cell::OffBoard => None,
        }
    }

    #[inline]
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Piece(piece) => Some(piece),
            _ => None,
        }
    }

    /// Layout glyph: `X`/`O` for discs, `KQRBNP`/`kqrbnp` for pieces
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::OffBoard => ' ',
            Cell::Disc(Side::White) => 'X',
            Cell::Disc(Side::Black) => 'O',
            Cell::Piece(piece) => match piece.side {
                Side::White => piece.kind.letter().to_ascii_uppercase(),
                Side::Black => piece.kind.letter(),
            },
        }
    }

    /// Inverse of [`Cell::glyph`] for the given rule set
    pub fn from_glyph(kind: GameKind, glyph: char) -> Option<Cell> {
        if glyph == '.' {
            return Some(Cell::Empty);
        }
        match kind {
            GameKind::ConnectFour => match glyph {
                'X' => Some(Cell::Disc(Side::White)),
                'O' => Some(Cell::Disc(Side::Black)),
                _ => None,
            },
            GameKind::Chess => {
                let piece_kind = PieceKind::from_letter(glyph)?;
                let side = if glyph.is_ascii_uppercase() {
                    Side::White
                } else {
                    Side::Black
                };
                Some(Cell::Piece(Piece::new(side, piece_kind)))
            }
        }
    }
}
