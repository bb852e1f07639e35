//! Universal Chess Interface (UCI) protocol implementation.
//!
//! Handles communication with chess GUIs following the UCI specification.

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::error::GameError;
use crate::game::ChessGame;
use crate::position::SearchPosition;
use crate::search::{Engine, Level};
use crate::tt::TableStore;
use crate::types::Color;

pub mod command;
pub mod options;
pub mod print;

use command::{parse_go_depth, parse_uci_command, UciCommand};
use options::{parse_setoption, EngineOptions, UciOptionAction, MAX_DEPTH};

/// Error type for UCI position command parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciError {
    /// Missing required parts in the command
    MissingParts,
    /// Invalid FEN or move in the move list
    Game(GameError),
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::MissingParts => write!(f, "Missing required parts in position command"),
            UciError::Game(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for UciError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UciError::Game(e) => Some(e),
            UciError::MissingParts => None,
        }
    }
}

impl From<GameError> for UciError {
    fn from(e: GameError) -> Self {
        UciError::Game(e)
    }
}

/// Parse a UCI position command into a fresh game.
///
/// Supports both "position startpos" and "position fen <fen>" formats,
/// optionally followed by "moves <move1> <move2> ...".
pub fn try_parse_position_command(parts: &[&str]) -> Result<ChessGame, UciError> {
    let mut i = 1;

    if i >= parts.len() {
        return Err(UciError::MissingParts);
    }

    let mut game = if parts[i] == "startpos" {
        i += 1;
        ChessGame::new()
    } else if parts[i] == "fen" {
        let end = parts[i + 1..]
            .iter()
            .position(|p| *p == "moves")
            .map_or(parts.len(), |offset| i + 1 + offset);
        if end == i + 1 {
            return Err(UciError::MissingParts);
        }
        let fen = parts[i + 1..end].join(" ");
        i = end;
        ChessGame::from_fen(&fen)?
    } else {
        return Err(UciError::MissingParts);
    };

    if i < parts.len() && parts[i] == "moves" {
        for notation in &parts[i + 1..] {
            game.push_uci(notation)?;
        }
    }

    Ok(game)
}

/// A protocol session: the current game, the engine and its options.
pub struct UciSession {
    game: ChessGame,
    engine: Engine,
    options: EngineOptions,
}

impl Default for UciSession {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl UciSession {
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        let engine = match options.seed {
            Some(seed) => Engine::new(seed),
            None => Engine::from_entropy(),
        };
        UciSession {
            game: ChessGame::new(),
            engine,
            options,
        }
    }

    #[must_use]
    pub fn game(&self) -> &ChessGame {
        &self.game
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Handle one input line. Returns `false` once the session should end.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let Some(cmd) = parse_uci_command(line) else {
            return Ok(true);
        };

        match cmd {
            UciCommand::Uci => self.options.print(out)?,
            UciCommand::IsReady => print::print_ready(out)?,
            UciCommand::UciNewGame => {
                self.game = ChessGame::new();
                self.engine.clear_table();
            }
            UciCommand::Position(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                match try_parse_position_command(&parts) {
                    Ok(game) => self.game = game,
                    Err(e) => log::warn!("ignoring position command: {e}"),
                }
            }
            UciCommand::Go(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                self.go(parse_go_depth(&parts), out)?;
            }
            UciCommand::SetOption(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                if let Some((name, value)) = parse_setoption(&parts) {
                    if let Some(UciOptionAction::Reseed(seed)) =
                        self.options.apply_setoption(&name, value.as_deref())
                    {
                        self.engine.reseed(seed);
                    }
                }
            }
            UciCommand::Quit => return Ok(false),
            UciCommand::Unknown(text) => log::debug!("unknown command '{text}'"),
        }

        out.flush()?;
        Ok(true)
    }

    fn go<W: Write>(&mut self, depth: Option<u32>, out: &mut W) -> io::Result<()> {
        let level = match (self.options.level(), depth) {
            (Level::Medium { .. }, Some(depth)) => Level::Medium {
                depth: depth.clamp(1, MAX_DEPTH),
            },
            (level, _) => level,
        };

        let chosen = match level {
            Level::Easy => self.engine.choose_move(&mut self.game, level),
            Level::Medium { depth } => match self.engine.search(&mut self.game, depth) {
                Ok(outcome) => {
                    if let Some(score) = outcome.score {
                        let relative = match self.game.side_to_move() {
                            Color::White => score,
                            Color::Black => -score,
                        };
                        print::print_search_info(out, depth, relative, &outcome.stats)?;
                    }
                    Ok(outcome.best_move)
                }
                Err(e) => Err(e),
            },
        };

        let best = match chosen {
            Ok(best) => best,
            Err(e) => {
                log::warn!("search failed: {e}");
                None
            }
        };
        let notation = best.map(|mv| self.game.uci(&mv));
        print::print_bestmove(out, notation.as_deref())
    }

    /// Entries currently memoized by the engine.
    #[must_use]
    pub fn table_len(&self) -> usize {
        self.engine.table().len()
    }
}

/// Run the protocol loop on stdin and stdout until `quit` or end of input.
pub fn run_uci_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = UciSession::default();

    for line in stdin.lock().lines() {
        if !session.handle(&line?, &mut out)? {
            break;
        }
    }
    Ok(())
}
