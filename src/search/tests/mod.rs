//! Search module tests.
//!
//! Tests are organized into separate files by category:
//! - `search.rs` - Negamax, root selection, recovery paths
//! - `proptest.rs` - Property-based tests against a full-width reference

mod search;

use std::cell::Cell;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::SearchError;
use crate::evaluation::{Evaluate, MaterialEvaluator};
use crate::game::ChessGame;
use crate::position::SearchPosition;
use crate::game::PositionKey;
use crate::types::{Color, PieceKind, Score, Terminal};

/// Play `plies` random legal moves from the start position.
fn random_game(seed: u64, plies: usize) -> ChessGame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = ChessGame::new();
    for _ in 0..plies {
        if game.is_game_over() {
            break;
        }
        let moves = game.legal_moves();
        let Some(mv) = moves.choose(&mut rng) else {
            break;
        };
        game.push(mv);
    }
    game
}

/// Plain negamax without pruning or memoization.
fn full_width<P: SearchPosition>(position: &mut P, depth: u32, sign: i8) -> Score {
    let leaf = |position: &P| {
        f64::from(sign)
            * MaterialEvaluator
                .evaluate(position)
                .expect("material evaluation cannot fail")
    };

    if depth == 0 || position.is_game_over() {
        return leaf(position);
    }
    let moves = position.legal_moves();
    if moves.is_empty() {
        return leaf(position);
    }

    let mut best = Score::NEG_INFINITY;
    for mv in &moves {
        position.push(mv);
        let value = -full_width(position, depth - 1, -sign);
        position.pop();
        best = best.max(value);
    }
    best
}

/// Fails once it has scored `budget` positions.
struct FailingEvaluator {
    budget: Cell<u32>,
}

impl FailingEvaluator {
    fn after(budget: u32) -> Self {
        FailingEvaluator {
            budget: Cell::new(budget),
        }
    }
}

impl<P: SearchPosition> Evaluate<P> for FailingEvaluator {
    fn evaluate(&self, position: &P) -> Result<Score, SearchError> {
        let left = self.budget.get();
        if left == 0 {
            return Err(SearchError::Evaluation {
                reason: "budget exhausted".to_string(),
            });
        }
        self.budget.set(left - 1);
        MaterialEvaluator.evaluate(position)
    }
}

/// Scores every position the same.
struct ConstantEvaluator(Score);

impl<P: SearchPosition> Evaluate<P> for ConstantEvaluator {
    fn evaluate(&self, _position: &P) -> Result<Score, SearchError> {
        Ok(self.0)
    }
}

/// A rules engine that reports no moves yet never calls the game over.
struct Stuck(ChessGame);

impl SearchPosition for Stuck {
    type Move = <ChessGame as SearchPosition>::Move;
    type Key = PositionKey;

    fn key(&self) -> PositionKey {
        self.0.key()
    }
    fn side_to_move(&self) -> Color {
        self.0.side_to_move()
    }
    fn legal_moves(&self) -> Vec<Self::Move> {
        Vec::new()
    }
    fn pieces(&self) -> Vec<(Color, PieceKind)> {
        self.0.pieces()
    }
    fn captured_piece(&self, mv: &Self::Move) -> Option<PieceKind> {
        self.0.captured_piece(mv)
    }
    fn push(&mut self, mv: &Self::Move) {
        self.0.push(mv);
    }
    fn pop(&mut self) {
        self.0.pop();
    }
    fn terminal(&self) -> Option<Terminal> {
        None
    }
}
