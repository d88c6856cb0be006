use std::io::{self, BufRead, Write};

use crate::chess_board::{ChessBoard, Color};

fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Interactive terminal game. Renders the board, reads coordinate moves like
/// `e2e4` and matches them against the current legal set; the engine itself
/// never parses input. `undo` takes back the last move, `quit` (or EOF)
/// leaves the game. The loop ends when no legal move remains.
pub fn run(mut board: ChessBoard) {
    let stdin = io::stdin();

    loop {
        println!("{}", board.render_to_string());

        let report = board.legal_moves();
        let side = side_name(board.active_color());
        if report.moves.is_empty() {
            // an empty set while in check is mate; otherwise the side is
            // simply stuck
            if report.in_check {
                println!("{} is checkmated.", side);
            } else {
                println!("{} has no legal moves.", side);
            }
            break;
        }
        if report.in_check {
            println!("{} is in check.", side);
        }

        print!(
            "{} to move ({} legal moves, e.g. {}): ",
            side,
            report.moves.len(),
            report.moves[0]
        );
        let _ = io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }

        match line.trim() {
            "" => {}
            "quit" | "q" => break,
            "undo" => match board.try_undo_move() {
                Ok(mv) => log::info!("took back {}", mv),
                Err(err) => println!("{}", err),
            },
            label => match report.moves.iter().find(|m| m.as_algebraic() == label) {
                Some(&mv) => {
                    log::info!("playing {}", mv);
                    board.make_move(mv);
                }
                None => println!("'{}' is not a legal move here", label),
            },
        }
    }
}
