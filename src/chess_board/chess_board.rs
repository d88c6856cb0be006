use thiserror::Error;

use super::fen;
use super::fen::FenError;
use super::{ChessField, Color, Move, Piece, PieceType, Square};

/// Failure kinds for the checked mutation paths. The unchecked `make_move`
/// and `undo_move` trust their callers and never report these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("move {0} is not legal in the current position")]
    IllegalMove(String),
    #[error("no move to undo")]
    EmptyUndo,
}

/// Board grid, side to move, king locations and the move history needed to
/// undo. The grid is only ever mutated through `make_move` and `undo_move`,
/// which keep the king caches synchronized with the squares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    pub(crate) squares: [[Square; 8]; 8],
    pub(crate) active_color: Color,
    pub(crate) move_log: Vec<Move>,
    pub(crate) white_king: ChessField,
    pub(crate) black_king: ChessField,
}

impl ChessBoard {
    /// Standard initial arrangement, white to move.
    pub fn new() -> Self {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut squares = [[Square::Empty; 8]; 8];
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            squares[0][col] = Square::Occupied(Piece {
                color: Color::Black,
                kind,
            });
            squares[7][col] = Square::Occupied(Piece {
                color: Color::White,
                kind,
            });
        }
        for col in 0..8 {
            squares[1][col] = Square::Occupied(Piece {
                color: Color::Black,
                kind: PieceType::Pawn,
            });
            squares[6][col] = Square::Occupied(Piece {
                color: Color::White,
                kind: PieceType::Pawn,
            });
        }

        Self {
            squares,
            active_color: Color::White,
            move_log: Vec::new(),
            white_king: ChessField::new(7, 4),
            black_king: ChessField::new(0, 4),
        }
    }

    /// Delegates FEN parsing to the `fen` module.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        fen::from_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }

    /// Read-only view of the grid for rendering.
    #[allow(dead_code)]
    pub fn squares(&self) -> &[[Square; 8]; 8] {
        &self.squares
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    #[allow(dead_code)]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    pub fn king_square(&self, color: Color) -> ChessField {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Executes `mv` without legality checking; the caller is trusted to pass
    /// a move obtained from `legal_moves` on this position. The destination is
    /// plainly overwritten, which captures whatever stood there.
    pub fn make_move(&mut self, mv: Move) {
        if let Square::Occupied(captured) = mv.captured {
            assert!(
                captured.kind != PieceType::King,
                "move {} would capture a king",
                mv
            );
        }

        self.squares[mv.from.row as usize][mv.from.col as usize] = Square::Empty;
        self.squares[mv.to.row as usize][mv.to.col as usize] = Square::Occupied(mv.piece_moved);
        self.move_log.push(mv);
        self.active_color = self.active_color.opposite();

        if mv.piece_moved.kind == PieceType::King {
            match mv.piece_moved.color {
                Color::White => self.white_king = mv.to,
                Color::Black => self.black_king = mv.to,
            }
        }
    }

    /// Reverts the most recent move and returns it; does nothing on an empty
    /// history.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;
        self.squares[mv.from.row as usize][mv.from.col as usize] = Square::Occupied(mv.piece_moved);
        self.squares[mv.to.row as usize][mv.to.col as usize] = mv.captured;
        self.active_color = self.active_color.opposite();

        if mv.piece_moved.kind == PieceType::King {
            match mv.piece_moved.color {
                Color::White => self.white_king = mv.from,
                Color::Black => self.black_king = mv.from,
            }
        }
        Some(mv)
    }

    /// Applies `mv` only if it appears in the current legal set; on rejection
    /// the position is left untouched.
    #[allow(dead_code)]
    pub fn try_make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.legal_moves().moves.contains(&mv) {
            self.make_move(mv);
            Ok(())
        } else {
            Err(MoveError::IllegalMove(mv.as_algebraic()))
        }
    }

    /// `undo_move` with the empty history surfaced as an error for hosts that
    /// want to report it.
    pub fn try_undo_move(&mut self) -> Result<Move, MoveError> {
        self.undo_move().ok_or(MoveError::EmptyUndo)
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for row in 0..8 {
            // row 0 holds rank 8, so top-down iteration paints rank 8 first
            let rank = 8 - row;
            board_representation.push_str(&format!("{} │", rank));
            for col in 0..8 {
                let square = match &self.squares[row][col] {
                    Square::Empty => ' ',
                    Square::Occupied(piece) => piece.to_char(),
                };
                board_representation.push_str(&format!(" {} │", square));
            }
            board_representation.push_str(&format!(" {}\n", rank));

            if row < 7 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::find_move;
    use super::*;

    #[test]
    fn test_new_board_layout() {
        let board = ChessBoard::new();
        assert_eq!(
            board.squares[0][0],
            Square::Occupied(Piece {
                color: Color::Black,
                kind: PieceType::Rook
            })
        );
        assert_eq!(
            board.squares[7][4],
            Square::Occupied(Piece {
                color: Color::White,
                kind: PieceType::King
            })
        );
        for col in 0..8 {
            assert_eq!(
                board.squares[6][col],
                Square::Occupied(Piece {
                    color: Color::White,
                    kind: PieceType::Pawn
                })
            );
        }
        assert_eq!(board.squares[4][4], Square::Empty);
        assert_eq!(board.active_color, Color::White);
        assert_eq!(board.king_square(Color::White), ChessField::new(7, 4));
        assert_eq!(board.king_square(Color::Black), ChessField::new(0, 4));
        assert!(board.move_log().is_empty());
    }

    #[test]
    fn test_make_move_updates_squares_and_turn() {
        let mut board = ChessBoard::new();
        let mv = find_move(&board.legal_moves().moves, "e2e4");
        board.make_move(mv);

        assert_eq!(board.squares[6][4], Square::Empty);
        assert_eq!(
            board.squares[4][4],
            Square::Occupied(Piece {
                color: Color::White,
                kind: PieceType::Pawn
            })
        );
        assert_eq!(board.active_color, Color::Black);
        assert_eq!(board.move_log().len(), 1);
        assert_eq!(board.king_square(Color::White), ChessField::new(7, 4));
    }

    #[test]
    fn test_make_move_captures_by_overwrite() {
        let mut board = ChessBoard::from_fen("4k3/8/8/3p4/8/8/8/3RK3 w - - 0 1").unwrap();
        let mv = find_move(&board.legal_moves().moves, "d1d5");
        board.make_move(mv);

        assert_eq!(
            board.squares[3][3],
            Square::Occupied(Piece {
                color: Color::White,
                kind: PieceType::Rook
            })
        );

        board.undo_move();
        assert_eq!(
            board.squares[3][3],
            Square::Occupied(Piece {
                color: Color::Black,
                kind: PieceType::Pawn
            })
        );
        assert_eq!(
            board.squares[7][3],
            Square::Occupied(Piece {
                color: Color::White,
                kind: PieceType::Rook
            })
        );
    }

    #[test]
    fn test_king_move_tracks_cache() {
        let mut board = ChessBoard::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = find_move(&board.legal_moves().moves, "e1d2");
        board.make_move(mv);
        assert_eq!(board.king_square(Color::White), ChessField::new(6, 3));

        board.undo_move();
        assert_eq!(board.king_square(Color::White), ChessField::new(7, 4));
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut board = ChessBoard::new();
        let before = board.clone();
        assert_eq!(board.undo_move(), None);
        assert_eq!(board, before);
        assert_eq!(board.try_undo_move(), Err(MoveError::EmptyUndo));
        assert_eq!(board, before);
    }

    #[test]
    fn test_try_make_move_rejects_foreign_moves() {
        let mut board = ChessBoard::new();
        let before = board.clone();
        // e2e5 is no pawn move; it was never produced by generation
        let bogus = Move::new(&board.squares, ChessField::new(6, 4), ChessField::new(3, 4));
        assert_eq!(
            board.try_make_move(bogus),
            Err(MoveError::IllegalMove("e2e5".to_string()))
        );
        assert_eq!(board, before);

        let ok = find_move(&board.legal_moves().moves, "g1f3");
        assert_eq!(board.try_make_move(ok), Ok(()));
        assert_eq!(board.active_color, Color::Black);
    }

    #[test]
    fn test_render_to_string_initial_position() {
        let rendered = ChessBoard::new().render_to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "    a   b   c   d   e   f   g   h  ");
        assert_eq!(lines[2], "8 │ r │ n │ b │ q │ k │ b │ n │ r │ 8");
        assert_eq!(lines[16], "1 │ R │ N │ B │ Q │ K │ B │ N │ R │ 1");
    }
}
