use thiserror::Error;

use super::{ChessBoard, ChessField, Color, Piece, PieceType, Square};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN needs at least piece placement and active color fields")]
    MissingFields,
    #[error("expected 8 rows in the piece placement, found {0}")]
    BadRowCount(usize),
    #[error("row {0} of the piece placement does not describe exactly 8 squares")]
    BadRowWidth(usize),
    #[error("invalid piece character {0:?}")]
    BadPieceChar(char),
    #[error("invalid active color field {0:?}")]
    BadActiveColor(String),
    #[error("{0:?} needs exactly one king, found {1}")]
    BadKingCount(Color, usize),
}

fn piece_from_char(c: char) -> Option<Piece> {
    let kind = match c.to_ascii_lowercase() {
        'p' => PieceType::Pawn,
        'n' => PieceType::Knight,
        'b' => PieceType::Bishop,
        'r' => PieceType::Rook,
        'q' => PieceType::Queen,
        'k' => PieceType::King,
        _ => return None,
    };
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some(Piece { color, kind })
}

fn locate_king(squares: &[[Square; 8]; 8], color: Color) -> Result<ChessField, FenError> {
    let mut found = None;
    let mut count = 0;
    for (row, rank) in squares.iter().enumerate() {
        for (col, square) in rank.iter().enumerate() {
            if let Square::Occupied(piece) = square {
                if piece.color == color && piece.kind == PieceType::King {
                    count += 1;
                    found = Some(ChessField::new(row as u8, col as u8));
                }
            }
        }
    }
    match (found, count) {
        (Some(field), 1) => Ok(field),
        _ => Err(FenError::BadKingCount(color, count)),
    }
}

/// Parses a FEN string into a board. The castling, en passant and clock
/// fields are accepted but ignored; this board does not model them. The
/// placement must put exactly one king of each color on the board.
pub fn from_fen(fen: &str) -> Result<ChessBoard, FenError> {
    let mut parts = fen.split_whitespace();
    let placement = parts.next().ok_or(FenError::MissingFields)?;
    let active = parts.next().ok_or(FenError::MissingFields)?;

    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::BadRowCount(rows.len()));
    }

    // FEN lists rank 8 first, which is board row 0
    let mut squares = [[Square::Empty; 8]; 8];
    for (row_index, row) in rows.iter().enumerate() {
        let mut col_index = 0usize;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                col_index += skip as usize;
            } else {
                let piece = piece_from_char(c).ok_or(FenError::BadPieceChar(c))?;
                if col_index > 7 {
                    return Err(FenError::BadRowWidth(row_index));
                }
                squares[row_index][col_index] = Square::Occupied(piece);
                col_index += 1;
            }
        }
        if col_index != 8 {
            return Err(FenError::BadRowWidth(row_index));
        }
    }

    let active_color = match active {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::BadActiveColor(other.to_string())),
    };

    let white_king = locate_king(&squares, Color::White)?;
    let black_king = locate_king(&squares, Color::Black)?;

    Ok(ChessBoard {
        squares,
        active_color,
        move_log: Vec::new(),
        white_king,
        black_king,
    })
}

/// Serializes the board. Castling, en passant and the clocks are not
/// tracked, so those fields always read `- - 0 1`.
pub fn to_fen(board: &ChessBoard) -> String {
    let mut placement = String::new();

    for row in 0..8 {
        let mut empty_run = 0;
        for col in 0..8 {
            match board.squares[row][col] {
                Square::Occupied(piece) => {
                    if empty_run > 0 {
                        placement.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    placement.push(piece.to_char());
                }
                Square::Empty => empty_run += 1,
            }
        }
        if empty_run > 0 {
            placement.push_str(&empty_run.to_string());
        }
        if row < 7 {
            placement.push('/');
        }
    }

    let active = if board.active_color == Color::White { "w" } else { "b" };
    format!("{} {} - - 0 1", placement, active)
}
