mod chess_board;
mod ui;

use chess_board::perft::perft;
use chess_board::{ChessBoard, INITIAL_POSITION};

use clap::arg;
use clap::command;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

fn main() {
    env_logger::init();

    let matches = command!()
        .propagate_version(true)
        .subcommand(Command::new("play").about("Play a game on the terminal board"))
        .subcommand(
            Command::new("perft")
                .about("Count legal move paths from a position")
                .arg(
                    arg!(
                        -f --fen <FEN> "Board position"
                    )
                    .default_value(INITIAL_POSITION),
                )
                .arg(
                    arg!(
                        -x --depth <d> "depth"
                    )
                    .default_value("3")
                    .value_parser(clap::value_parser!(u8)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("perft", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").unwrap();
            let depth = *arg_matches.get_one::<u8>("depth").unwrap();
            run_perft(fen, depth);
        }
        Some(("play", _)) | None => {
            ui::run(ChessBoard::new());
        }
        _ => unreachable!("exhausted list of subcommands"),
    }
}

#[derive(Tabled)]
struct PerftRow {
    first_move: String,
    nodes: u64,
}

fn run_perft(fen: &str, depth: u8) {
    let board = match ChessBoard::from_fen(fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("invalid FEN {:?}: {}", fen, err);
            std::process::exit(1);
        }
    };
    println!("Perft for {} with depth {}", board.to_fen(), depth);

    if depth == 0 {
        println!("Nodes searched: 1");
        return;
    }

    let mut rows = Vec::new();
    let mut num_nodes = 0u64;
    for mv in board.legal_moves().moves {
        let mut new_board = board.clone();
        new_board.make_move(mv);
        let nodes = perft(&new_board, depth - 1);
        num_nodes += nodes;
        rows.push(PerftRow {
            first_move: mv.as_algebraic(),
            nodes,
        });
    }
    rows.sort_by(|a, b| a.first_move.cmp(&b.first_move));

    println!("{}", Table::new(rows).with(Style::modern()));
    println!("Nodes searched: {}", num_nodes);
}
