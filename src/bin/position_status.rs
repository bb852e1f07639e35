use std::env;
use std::process::ExitCode;

use chess_search::uci::try_parse_position_command;
use chess_search::{Color, Engine, SearchPosition, DEFAULT_DEPTH};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut parts: Vec<&str> = vec!["position", "startpos", "moves"];
    parts.extend(args.iter().skip(1).map(String::as_str));

    let mut game = match try_parse_position_command(&parts) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let legal_moves = game.legal_moves();
    let side = match game.side_to_move() {
        Color::White => "white",
        Color::Black => "black",
    };
    println!("side_to_move: {side}");
    println!("key: {}", game.key());
    println!("legal_moves: {}", legal_moves.len());
    match game.terminal() {
        Some(terminal) => println!("terminal: {terminal:?} ({})", game.result().unwrap_or("*")),
        None => println!("terminal: none"),
    }

    let mut engine = Engine::new(0);
    match engine.search(&mut game, DEFAULT_DEPTH) {
        Ok(outcome) => {
            if let Some(mv) = &outcome.best_move {
                println!("best_move: {}", game.uci(mv));
            }
            if let Some(score) = outcome.score {
                println!("score: {score:.2}");
            }
            println!("nodes: {}", outcome.stats.nodes);
        }
        Err(e) => {
            eprintln!("search failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    for mv in &legal_moves {
        println!("{}", game.uci(mv));
    }
    ExitCode::SUCCESS
}
