//! Casual move picker used by the easy level.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::position::SearchPosition;
use crate::types::Score;

/// Chance of playing the most valuable capture when one exists
pub const CAPTURE_PREFERENCE: f64 = 0.3;

/// A random legal move, or now and then the capture of the most valuable
/// piece on offer. `None` without legal moves.
pub fn casual_move<P, R>(position: &P, rng: &mut R) -> Option<P::Move>
where
    P: SearchPosition,
    R: Rng + ?Sized,
{
    let moves = position.legal_moves();
    if moves.is_empty() {
        return None;
    }

    let mut best_capture: Option<(Score, &P::Move)> = None;
    for mv in &moves {
        if let Some(victim) = position.captured_piece(mv) {
            let value = victim.value();
            if best_capture.map_or(true, |(best, _)| value > best) {
                best_capture = Some((value, mv));
            }
        }
    }

    if let Some((_, capture)) = best_capture {
        if rng.gen_bool(CAPTURE_PREFERENCE) {
            return Some(capture.clone());
        }
    }

    moves.choose(rng).cloned()
}
