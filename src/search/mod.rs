//! Search module implementing depth-limited negamax.
//!
//! Features:
//! - Negamax with fail-soft alpha-beta pruning
//! - Transposition table with depth and bound guards
//! - Capture-first move ordering (most valuable victim first)
//! - Seeded random tie-break among equally scored root moves
//! - Casual move picker for the easy level

mod casual;
mod move_order;
mod negamax;
#[cfg(test)]
mod tests;

pub use casual::{casual_move, CAPTURE_PREFERENCE};
pub use move_order::order_moves;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::SearchError;
use crate::evaluation::{Evaluate, MaterialEvaluator};
use crate::game::PositionKey;
use crate::position::{Pushed, SearchPosition};
use crate::tt::{TableStore, TranspositionTable};
use crate::types::Score;

/// Default search depth in plies
pub const DEFAULT_DEPTH: u32 = 3;

/// Chance that an equally scored root move replaces the current best
pub const TIE_BREAK_PROBABILITY: f64 = 0.1;

/// Statistics tracked during one root search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    pub nodes: u64,
    pub table_hits: u64,
    pub cutoffs: u64,
}

/// Result of a root search
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<M> {
    /// The selected move, `None` when there are no legal moves
    pub best_move: Option<M>,
    /// Score of the selected move, positive favoring White. `None` when no
    /// move was searched or the move came from the random fallback.
    pub score: Option<Score>,
    pub stats: SearchStats,
}

/// Playing strength
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Random moves, sometimes grabbing the most valuable capture
    Easy,
    /// Full-width alpha-beta search to a fixed depth
    Medium { depth: u32 },
}

impl Default for Level {
    fn default() -> Self {
        Level::Medium {
            depth: DEFAULT_DEPTH,
        }
    }
}

/// A search engine owning its transposition table, evaluator and random
/// source.
pub struct Engine<T = TranspositionTable<PositionKey>, E = MaterialEvaluator> {
    table: T,
    evaluator: E,
    rng: StdRng,
    stats: SearchStats,
}

impl Engine {
    /// Engine for [`ChessGame`](crate::ChessGame) with a fresh table.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Engine::with_parts(TranspositionTable::new(), MaterialEvaluator, seed)
    }

    /// Like [`Engine::new`] but seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Engine::with_rng(TranspositionTable::new(), MaterialEvaluator, StdRng::from_entropy())
    }
}

impl<T, E> Engine<T, E> {
    #[must_use]
    pub fn with_parts(table: T, evaluator: E, seed: u64) -> Self {
        Engine::with_rng(table, evaluator, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_rng(table: T, evaluator: E, rng: StdRng) -> Self {
        Engine {
            table,
            evaluator,
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Restart the random source, making tie-breaks reproducible.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Statistics of the last root search.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[must_use]
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Forget every memoized position, e.g. between independent games.
    pub fn clear_table(&mut self)
    where
        T: TableStore,
    {
        self.table.clear();
        self.stats = SearchStats::default();
    }

    /// Pick a move at the given strength.
    pub fn choose_move<P>(
        &mut self,
        position: &mut P,
        level: Level,
    ) -> Result<Option<P::Move>, SearchError>
    where
        P: SearchPosition,
        T: TableStore<Key = P::Key>,
        E: Evaluate<P>,
    {
        match level {
            Level::Easy => Ok(casual_move(position, &mut self.rng)),
            Level::Medium { depth } => self.best_move(position, depth),
        }
    }

    /// Best move found by a `depth`-ply search, `None` without legal moves.
    pub fn best_move<P>(
        &mut self,
        position: &mut P,
        depth: u32,
    ) -> Result<Option<P::Move>, SearchError>
    where
        P: SearchPosition,
        T: TableStore<Key = P::Key>,
        E: Evaluate<P>,
    {
        Ok(self.search(position, depth)?.best_move)
    }

    /// Search every root move `depth` plies deep and report the best one.
    ///
    /// A depth of 0 is searched as 1. The position is left as it was found,
    /// also when an error is returned.
    pub fn search<P>(
        &mut self,
        position: &mut P,
        depth: u32,
    ) -> Result<SearchOutcome<P::Move>, SearchError>
    where
        P: SearchPosition,
        T: TableStore<Key = P::Key>,
        E: Evaluate<P>,
    {
        self.stats = SearchStats::default();

        let mut moves = position.legal_moves();
        if moves.is_empty() {
            return Ok(SearchOutcome {
                best_move: None,
                score: None,
                stats: self.stats,
            });
        }

        let depth = depth.max(1);
        let root_sign = position.side_to_move().sign();
        order_moves(position, &mut moves);

        let mut best_value = Score::NEG_INFINITY;
        let mut best_index = None;

        for (i, mv) in moves.iter().enumerate() {
            let value = {
                let mut child = Pushed::new(position, mv);
                -self.negamax(
                    &mut *child,
                    depth - 1,
                    Score::NEG_INFINITY,
                    Score::INFINITY,
                    -root_sign,
                )?
            };

            if value > best_value {
                best_value = value;
                best_index = Some(i);
            } else if value == best_value && self.rng.gen_bool(TIE_BREAK_PROBABILITY) {
                best_index = Some(i);
            }
        }

        let Some(index) = best_index else {
            log::warn!(
                "search selected none of {} legal moves, falling back to a random move",
                moves.len()
            );
            return Ok(SearchOutcome {
                best_move: moves.choose(&mut self.rng).cloned(),
                score: None,
                stats: self.stats,
            });
        };

        let score = best_value * f64::from(root_sign);
        log::debug!(
            "depth {} score {:.2} nodes {} table hits {} cutoffs {}",
            depth,
            score,
            self.stats.nodes,
            self.stats.table_hits,
            self.stats.cutoffs
        );

        Ok(SearchOutcome {
            best_move: Some(moves.swap_remove(index)),
            score: Some(score),
            stats: self.stats,
        })
    }
}
