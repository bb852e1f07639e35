//! Capture-first move ordering.

use std::cmp::Ordering;

use crate::position::SearchPosition;

/// Sort `moves` so captures come first, most valuable victim first.
///
/// The sort is stable, so moves that tie keep the generator's order.
pub fn order_moves<P: SearchPosition>(position: &P, moves: &mut [P::Move]) {
    moves.sort_by(|a, b| {
        match (position.captured_piece(a), position.captured_piece(b)) {
            (Some(a_victim), Some(b_victim)) => b_victim
                .value()
                .partial_cmp(&a_victim.value())
                .unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
