//! Core value types shared by the evaluator, the table and the searcher.

/// Search score. Positive favors White at the root, and the side to move
/// inside a negamax frame.
pub type Score = f64;

/// Magnitude reserved for a delivered checkmate.
pub const MATE_SCORE: Score = 1000.0;

/// Score of a confirmed draw.
pub const DRAW_SCORE: Score = 0.0;

/// Material values, in pawns.
pub const PAWN_VALUE: Score = 1.0;
pub const KNIGHT_VALUE: Score = 3.0;
pub const BISHOP_VALUE: Score = 3.0;
pub const ROOK_VALUE: Score = 5.0;
pub const QUEEN_VALUE: Score = 9.0;
pub const KING_VALUE: Score = 0.0;

/// Piece types
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material value of the piece.
    #[must_use]
    pub const fn value(self) -> Score {
        match self {
            PieceKind::Pawn => PAWN_VALUE,
            PieceKind::Knight => KNIGHT_VALUE,
            PieceKind::Bishop => BISHOP_VALUE,
            PieceKind::Rook => ROOK_VALUE,
            PieceKind::Queen => QUEEN_VALUE,
            PieceKind::King => KING_VALUE,
        }
    }
}

/// Colors
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Negamax perspective sign: +1 for White, -1 for Black.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

/// Why a game is over.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terminal {
    /// The side to move is mated.
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl Terminal {
    #[must_use]
    pub const fn is_draw(self) -> bool {
        !matches!(self, Terminal::Checkmate)
    }
}
