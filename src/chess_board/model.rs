use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta a pawn of this color advances by. Row 0 is black's back
    /// rank, so white pawns walk toward smaller row indices.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row the color's pawns start the game on.
    pub fn pawn_start_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        if self.color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessField {
    pub row: u8,
    pub col: u8,
}

impl ChessField {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn as_algebraic(&self) -> String {
        to_algebraic_square(self.row, self.col)
    }
}

/// A single piece relocation, frozen at generation time together with the
/// contents of its destination square.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: ChessField,
    pub to: ChessField,
    pub piece_moved: Piece,
    pub captured: Square,
}

impl Move {
    /// Snapshots origin and destination from `squares`. Panics on an empty
    /// origin; only generation is expected to build moves.
    pub(crate) fn new(squares: &[[Square; 8]; 8], from: ChessField, to: ChessField) -> Self {
        let piece_moved = match squares[from.row as usize][from.col as usize] {
            Square::Occupied(piece) => piece,
            Square::Empty => panic!("move origin {} is empty", from.as_algebraic()),
        };
        Self {
            from,
            to,
            piece_moved,
            captured: squares[to.row as usize][to.col as usize],
        }
    }

    /// Origin and destination packed into one comparable key. Two moves with
    /// the same coordinates are the same move; a position never offers two
    /// legal moves that share coordinates but differ otherwise.
    pub fn key(&self) -> u16 {
        self.from.row as u16 * 1000 + self.from.col as u16 * 100 + self.to.row as u16 * 10 + self.to.col as u16
    }

    /// 4-character coordinate label, origin square then destination square.
    pub fn as_algebraic(&self) -> String {
        format!("{}{}", self.from.as_algebraic(), self.to.as_algebraic())
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

pub fn to_algebraic_square(row: u8, col: u8) -> String {
    let file = (b'a' + col) as char;
    let rank = 8 - row; // row 0 is rank 8
    format!("{}{}", file, rank)
}
