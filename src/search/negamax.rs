use super::{order_moves, Engine};
use crate::error::SearchError;
use crate::evaluation::Evaluate;
use crate::position::{Pushed, SearchPosition};
use crate::tt::{BoundType, TableStore};
use crate::types::Score;

impl<T, E> Engine<T, E> {
    /// Negamax search with alpha-beta pruning and transposition table.
    ///
    /// `sign` is +1 when White is the side to move in this frame and -1 for
    /// Black; the returned score is always from the side to move's point of
    /// view.
    pub fn negamax<P>(
        &mut self,
        position: &mut P,
        depth: u32,
        mut alpha: Score,
        beta: Score,
        sign: i8,
    ) -> Result<Score, SearchError>
    where
        P: SearchPosition,
        T: TableStore<Key = P::Key>,
        E: Evaluate<P>,
    {
        self.stats.nodes += 1;

        // --- Transposition Table Probe ---
        let key = position.key();
        if let Some(entry) = self.table.probe(&key, depth) {
            if entry.cuts_window(alpha, beta) {
                self.stats.table_hits += 1;
                return Ok(entry.score);
            }
        }

        // --- Leaf ---
        if depth == 0 || position.is_game_over() {
            return self.leaf(position, key, sign);
        }

        let mut moves = position.legal_moves();
        if moves.is_empty() {
            log::warn!("no legal moves in a position not reported as game over");
            return self.leaf(position, key, sign);
        }
        order_moves(position, &mut moves);

        // --- Alpha-Beta ---
        let original_alpha = alpha;
        let mut best = Score::NEG_INFINITY;

        for mv in &moves {
            let value = {
                let mut child = Pushed::new(position, mv);
                -self.negamax(&mut *child, depth - 1, -beta, -alpha, -sign)?
            };

            best = best.max(value);
            alpha = alpha.max(best);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        // --- Transposition Table Store ---
        let bound_type = BoundType::classify(best, original_alpha, beta);
        self.table.put(key, depth, best, bound_type);

        Ok(best)
    }

    fn leaf<P>(&mut self, position: &P, key: P::Key, sign: i8) -> Result<Score, SearchError>
    where
        P: SearchPosition,
        T: TableStore<Key = P::Key>,
        E: Evaluate<P>,
    {
        let score = f64::from(sign) * self.evaluator.evaluate(position)?;
        self.table.put(key, 0, score, BoundType::Exact);
        Ok(score)
    }
}
