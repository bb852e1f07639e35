use crate::error::SearchError;
use crate::position::SearchPosition;
use crate::types::{Color, Score, Terminal, DRAW_SCORE, MATE_SCORE};

/// Mobility bonus per legal move of the side to move.
pub const MOBILITY_WEIGHT: Score = 0.01;

/// Scores positions from White's point of view.
pub trait Evaluate<P: SearchPosition> {
    fn evaluate(&self, position: &P) -> Result<Score, SearchError>;
}

/// Material balance plus a small mobility term, with terminal overrides.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl<P: SearchPosition> Evaluate<P> for MaterialEvaluator {
    fn evaluate(&self, position: &P) -> Result<Score, SearchError> {
        let side = position.side_to_move();

        // The side to move is the one that is mated.
        match position.terminal() {
            Some(Terminal::Checkmate) => {
                return Ok(match side {
                    Color::White => -MATE_SCORE,
                    Color::Black => MATE_SCORE,
                })
            }
            Some(_) => return Ok(DRAW_SCORE),
            None => {}
        }

        let mut score = material(position);
        match position.mobility() {
            Ok(count) => {
                let bonus = MOBILITY_WEIGHT * count as Score;
                match side {
                    Color::White => score += bonus,
                    Color::Black => score -= bonus,
                }
            }
            Err(e) => log::debug!("mobility unavailable, scoring without it: {e}"),
        }

        Ok(score)
    }
}

/// White material minus Black material.
pub fn material<P: SearchPosition>(position: &P) -> Score {
    position
        .pieces()
        .into_iter()
        .map(|(color, kind)| match color {
            Color::White => kind.value(),
            Color::Black => -kind.value(),
        })
        .sum()
}
