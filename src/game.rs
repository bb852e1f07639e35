//! Standard chess rules, backed by `shakmaty`.
//!
//! [`ChessGame`] implements [`SearchPosition`] with an undo stack of
//! positions and the list of keys seen so far, which is what fivefold
//! repetition is counted against.

use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::uci::Uci;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Piece, Position, Role, Square};

use crate::error::GameError;
use crate::position::SearchPosition;
use crate::types::{Color, PieceKind, Terminal};

/// Halfmove clock value at which the 75-move rule ends the game.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of one position that end the game.
const FIVEFOLD: usize = 5;

/// Canonical memoization key: piece placement, side to move, castling rights
/// and the legal en passant square. Move counters are not part of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey {
    placement: [u8; 64],
    white_to_move: bool,
    castling: u64,
    en_passant: Option<u8>,
}

impl PositionKey {
    #[must_use]
    pub fn of(position: &Chess) -> Self {
        let mut placement = [b'.'; 64];
        for (square, piece) in occupied(position) {
            placement[square as usize] = piece.char() as u8;
        }

        PositionKey {
            placement,
            white_to_move: position.turn().is_white(),
            castling: u64::from(position.castles().castling_rights()),
            en_passant: position
                .ep_square(EnPassantMode::Legal)
                .map(|square| square as u8),
        }
    }

    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }
}

/// Board in FEN piece-placement order followed by the side to move.
impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let cell = self.placement[rank * 8 + file];
                if cell == b'.' {
                    empty += 1;
                    continue;
                }
                if empty > 0 {
                    write!(f, "{empty}")?;
                    empty = 0;
                }
                write!(f, "{}", cell as char)?;
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        write!(f, " {}", if self.white_to_move { 'w' } else { 'b' })
    }
}

/// A chess game that can be searched in place.
#[derive(Clone, Debug)]
pub struct ChessGame {
    position: Chess,
    undo: Vec<Chess>,
    /// Keys of every position reached, the current one last.
    seen: Vec<PositionKey>,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let parsed: Fen = fen.trim().parse().map_err(|e| GameError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e}"),
        })?;
        let position: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|e| GameError::InvalidFen {
                    fen: fen.to_string(),
                    reason: format!("{e}"),
                })?;
        Ok(Self::from_position(position))
    }

    fn from_position(position: Chess) -> Self {
        let key = PositionKey::of(&position);
        ChessGame {
            position,
            undo: Vec::new(),
            seen: vec![key],
        }
    }

    #[must_use]
    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Moves pushed since the game was set up.
    #[must_use]
    pub fn ply(&self) -> usize {
        self.undo.len()
    }

    /// Parse a move in UCI format (e.g. "e2e4", "e7e8q") and play it.
    pub fn push_uci(&mut self, notation: &str) -> Result<Move, GameError> {
        let uci: Uci = notation.parse().map_err(|_| GameError::InvalidUci {
            notation: notation.to_string(),
        })?;
        let mv = uci
            .to_move(&self.position)
            .map_err(|_| GameError::IllegalMove {
                notation: notation.to_string(),
            })?;
        self.push(&mv);
        Ok(mv)
    }

    #[must_use]
    pub fn uci(&self, mv: &Move) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }

    /// Game result in PGN notation, if the game is over.
    #[must_use]
    pub fn result(&self) -> Option<&'static str> {
        self.terminal().map(|terminal| match terminal {
            Terminal::Checkmate => match self.side_to_move() {
                Color::White => "0-1",
                Color::Black => "1-0",
            },
            _ => "1/2-1/2",
        })
    }

    fn repetitions(&self) -> usize {
        match self.seen.last() {
            Some(current) => self.seen.iter().filter(|key| *key == current).count(),
            None => 0,
        }
    }
}

/// Occupied squares with their pieces. `Board` is only iterable by value.
fn occupied(position: &Chess) -> impl Iterator<Item = (Square, Piece)> {
    position.board().clone().into_iter()
}

fn piece_kind(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn color(color: shakmaty::Color) -> Color {
    if color.is_white() {
        Color::White
    } else {
        Color::Black
    }
}

impl SearchPosition for ChessGame {
    type Move = Move;
    type Key = PositionKey;

    fn key(&self) -> PositionKey {
        self.seen
            .last()
            .cloned()
            .unwrap_or_else(|| PositionKey::of(&self.position))
    }

    fn side_to_move(&self) -> Color {
        color(self.position.turn())
    }

    fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().to_vec()
    }

    fn pieces(&self) -> Vec<(Color, PieceKind)> {
        occupied(&self.position)
            .map(|(_, piece)| (color(piece.color), piece_kind(piece.role)))
            .collect()
    }

    fn captured_piece(&self, mv: &Move) -> Option<PieceKind> {
        mv.capture().map(piece_kind)
    }

    fn push(&mut self, mv: &Move) {
        let previous = self.position.clone();
        self.position.play_unchecked(mv);
        self.undo.push(previous);
        self.seen.push(PositionKey::of(&self.position));
    }

    fn pop(&mut self) {
        if let Some(previous) = self.undo.pop() {
            self.position = previous;
            self.seen.pop();
        }
    }

    fn terminal(&self) -> Option<Terminal> {
        if self.position.is_checkmate() {
            Some(Terminal::Checkmate)
        } else if self.position.is_stalemate() {
            Some(Terminal::Stalemate)
        } else if self.position.is_insufficient_material() {
            Some(Terminal::InsufficientMaterial)
        } else if self.position.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES {
            Some(Terminal::SeventyFiveMoves)
        } else if self.repetitions() >= FIVEFOLD {
            Some(Terminal::FivefoldRepetition)
        } else {
            None
        }
    }
}
