use super::{ChessBoard, ChessField, Move};

pub fn assert_moves<I: Iterator<Item = Move>>(generated: I, mut expected: Vec<&str>) {
    let mut generated_converted: Vec<_> = generated.map(|m| m.as_algebraic()).collect();
    generated_converted.sort();
    expected.sort();

    assert_eq!(generated_converted, expected);
}

/// Picks the move with the given coordinate label out of a generated set.
pub fn find_move(moves: &[Move], label: &str) -> Move {
    moves
        .iter()
        .copied()
        .find(|m| m.as_algebraic() == label)
        .unwrap_or_else(|| {
            let available: Vec<_> = moves.iter().map(|m| m.as_algebraic()).collect();
            panic!("no move {} among {:?}", label, available)
        })
}

/// Pseudo-legal moves of the piece on `square` (a label like "e4"), with the
/// current pins applied, the way full generation would see them.
pub fn pseudo_moves_from(board: &ChessBoard, square: &str) -> Vec<Move> {
    let mut chars = square.chars();
    let file = chars.next().expect("square label needs a file") as u8 - b'a';
    let rank = chars.next().expect("square label needs a rank") as u8 - b'0';
    let field = ChessField::new(8 - rank, file);

    let side = board.active_color();
    let analysis = board.scan_pins_and_checks(side, board.king_square(side));
    let mut moves = Vec::new();
    board.pseudo_moves_from(field.row, field.col, &analysis.pins, &mut moves);
    moves
}
