//! The rules-engine interface consumed by the search.
//!
//! The searcher never copies a position. It pushes a move, recurses and pops
//! it again, so every push must be matched by exactly one pop on every exit
//! path. [`Pushed`] ties the pop to a scope.

use std::fmt;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use crate::error::SearchError;
use crate::types::{Color, PieceKind, Terminal};

/// A game position that can be searched in place.
pub trait SearchPosition {
    type Move: Clone + PartialEq + fmt::Debug;
    /// Canonical memoization key.
    type Key: Clone + Eq + Hash;

    fn key(&self) -> Self::Key;

    fn side_to_move(&self) -> Color;

    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Number of legal moves for the side to move.
    fn mobility(&self) -> Result<usize, SearchError> {
        Ok(self.legal_moves().len())
    }

    /// Every piece on the board.
    fn pieces(&self) -> Vec<(Color, PieceKind)>;

    /// The piece `mv` would capture, if any.
    fn captured_piece(&self, mv: &Self::Move) -> Option<PieceKind>;

    fn push(&mut self, mv: &Self::Move);

    /// Undo the most recent [`push`](Self::push).
    fn pop(&mut self);

    fn terminal(&self) -> Option<Terminal>;

    fn is_game_over(&self) -> bool {
        self.terminal().is_some()
    }
}

/// A move applied for the lifetime of the guard.
///
/// Dropping the guard pops the move, including on `?` returns and unwinding.
pub struct Pushed<'a, P: SearchPosition> {
    position: &'a mut P,
}

impl<'a, P: SearchPosition> Pushed<'a, P> {
    pub fn new(position: &'a mut P, mv: &P::Move) -> Self {
        position.push(mv);
        Pushed { position }
    }
}

impl<P: SearchPosition> Deref for Pushed<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: SearchPosition> DerefMut for Pushed<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: SearchPosition> Drop for Pushed<'_, P> {
    fn drop(&mut self) {
        self.position.pop();
    }
}
