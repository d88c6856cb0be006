pub mod fen;
pub mod model;
pub mod perft;

mod chess_board;
mod move_generation;
#[cfg(test)]
pub mod test_utils;

pub use chess_board::{ChessBoard, MoveError};
pub use fen::{FenError, INITIAL_POSITION};
pub use model::{ChessField, Color, Move, Piece, PieceType, Square};
pub use move_generation::LegalMoves;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::test_utils::find_move;
    use super::*;

    const TEST_POSITIONS: [&str; 4] = [
        INITIAL_POSITION,
        // midgame, both sides developed
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/R1BQKB1R b - - 0 1",
        // tactical middlegame with pins and hanging pieces
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w - - 0 1",
        // white in check from the e8 rook
        "1k2r3/6N1/8/8/R7/8/8/4K3 w - - 0 1",
    ];

    #[test]
    fn test_initial_position_has_twenty_moves() {
        let board = ChessBoard::new();
        let report = board.legal_moves();
        assert!(!report.in_check);
        assert_eq!(report.moves.len(), 20);

        let pawn_moves = report
            .moves
            .iter()
            .filter(|m| m.piece_moved.kind == PieceType::Pawn)
            .count();
        let knight_moves = report
            .moves
            .iter()
            .filter(|m| m.piece_moved.kind == PieceType::Knight)
            .count();
        assert_eq!(pawn_moves, 16);
        assert_eq!(knight_moves, 4);
    }

    #[test]
    fn test_make_then_undo_restores_the_position() {
        for fen in TEST_POSITIONS {
            let board = ChessBoard::from_fen(fen).unwrap();
            for mv in board.legal_moves().moves {
                let mut probe = board.clone();
                probe.make_move(mv);
                probe.undo_move();
                assert_eq!(probe, board, "make/undo of {} changed {}", mv, fen);
            }
        }
    }

    #[test]
    fn test_legal_moves_never_leave_the_king_in_check() {
        for fen in TEST_POSITIONS {
            let board = ChessBoard::from_fen(fen).unwrap();
            let side = board.active_color();
            for mv in board.legal_moves().moves {
                let mut probe = board.clone();
                probe.make_move(mv);
                let analysis = probe.scan_pins_and_checks(side, probe.king_square(side));
                assert!(!analysis.in_check, "{} leaves the king in check in {}", mv, fen);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        for fen in TEST_POSITIONS {
            let board = ChessBoard::from_fen(fen).unwrap();
            let first: Vec<_> = board.legal_moves().moves.iter().map(|m| m.as_algebraic()).collect();
            let second: Vec<_> = board.legal_moves().moves.iter().map(|m| m.as_algebraic()).collect();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_double_check_allows_only_king_moves() {
        // rook e1 and knight f6 both check the black king
        let board = ChessBoard::from_fen("4k3/8/5N2/8/8/8/8/K3R3 b - - 0 1").unwrap();
        let analysis = board.scan_pins_and_checks(Color::Black, board.king_square(Color::Black));
        assert_eq!(analysis.checks.len(), 2);

        let report = board.legal_moves();
        assert!(report.in_check);
        assert!(report.moves.iter().all(|m| m.piece_moved.kind == PieceType::King));
        test_utils::assert_moves(report.moves.into_iter(), vec!["e8d8", "e8f8", "e8f7"]);
    }

    #[test]
    fn test_fools_mate_is_mate() {
        let mut board = ChessBoard::new();
        for label in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let mv = find_move(&board.legal_moves().moves, label);
            board.make_move(mv);
        }

        let report = board.legal_moves();
        assert!(report.in_check);
        assert!(report.moves.is_empty());

        let analysis = board.scan_pins_and_checks(Color::White, board.king_square(Color::White));
        assert_eq!(analysis.checks.len(), 1);
    }

    #[test]
    fn test_move_equality_ignores_the_captured_piece() {
        let with_capture = ChessBoard::from_fen("4k3/8/8/3p4/8/8/8/3RK3 w - - 0 1").unwrap();
        let without_capture = ChessBoard::from_fen("4k3/8/8/8/8/8/8/3RK3 w - - 0 1").unwrap();
        let a = find_move(&with_capture.legal_moves().moves, "d1d5");
        let b = find_move(&without_capture.legal_moves().moves, "d1d5");

        assert_ne!(a.captured, b.captured);
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_moves_have_unique_keys() {
        for fen in TEST_POSITIONS {
            let board = ChessBoard::from_fen(fen).unwrap();
            let moves = board.legal_moves().moves;
            let keys: HashSet<u16> = moves.iter().map(|m| m.key()).collect();
            assert_eq!(keys.len(), moves.len(), "duplicate coordinates in {}", fen);
        }
    }
}
