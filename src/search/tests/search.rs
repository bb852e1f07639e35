//! Negamax and root selection tests.

use std::collections::HashSet;

use super::{full_width, ConstantEvaluator, FailingEvaluator, Stuck};
use crate::error::SearchError;
use crate::evaluation::{Evaluate, MaterialEvaluator};
use crate::game::{ChessGame, PositionKey};
use crate::position::SearchPosition;
use crate::search::{Engine, Level, DEFAULT_DEPTH};
use crate::tt::{BoundType, NoTable, SharedTranspositionTable, TableStore, TranspositionTable};
use crate::types::{Score, MATE_SCORE};

fn uci_of(engine: &mut Engine, game: &mut ChessGame, depth: u32) -> Option<String> {
    engine
        .best_move(game, depth)
        .unwrap()
        .map(|mv| game.uci(&mv))
}

// ============================================================================
// Negamax tests
// ============================================================================

#[test]
fn negamax_scores_white_mate_in_one() {
    let mut game = ChessGame::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").unwrap();
    let mut engine = Engine::new(0);
    let score = engine
        .negamax(&mut game, 1, Score::NEG_INFINITY, Score::INFINITY, 1)
        .unwrap();
    assert_eq!(score, MATE_SCORE);
}

#[test]
fn negamax_scores_black_mate_in_one() {
    let mut game = ChessGame::from_fen("4q2k/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let mut engine = Engine::new(0);
    let relative = engine
        .negamax(&mut game, 1, Score::NEG_INFINITY, Score::INFINITY, -1)
        .unwrap();
    assert_eq!(relative, MATE_SCORE);
    // From White's point of view.
    assert_eq!(-relative, -MATE_SCORE);
}

#[test]
fn negamax_is_deterministic() {
    let mut game = super::random_game(11, 8);
    let mut engine = Engine::new(5);
    let first = engine
        .negamax(&mut game, 3, Score::NEG_INFINITY, Score::INFINITY, 1)
        .unwrap();
    let second = engine
        .negamax(&mut game, 3, Score::NEG_INFINITY, Score::INFINITY, 1)
        .unwrap();
    assert_eq!(first, second);

    let mut fresh = Engine::new(99);
    let third = fresh
        .negamax(&mut game, 3, Score::NEG_INFINITY, Score::INFINITY, 1)
        .unwrap();
    assert_eq!(first, third);
}

#[test]
fn negamax_matches_full_width_at_depth_three() {
    let mut game = super::random_game(3, 10);
    let sign = game.side_to_move().sign();
    let expected = full_width(&mut game, 3, sign);

    let mut engine = Engine::new(0);
    let with_table = engine
        .negamax(&mut game, 3, Score::NEG_INFINITY, Score::INFINITY, sign)
        .unwrap();
    assert_eq!(with_table, expected);

    let mut bare = Engine::with_parts(NoTable::<PositionKey>::new(), MaterialEvaluator, 0);
    let without_table = bare
        .negamax(&mut game, 3, Score::NEG_INFINITY, Score::INFINITY, sign)
        .unwrap();
    assert_eq!(without_table, expected);
    assert!(bare.stats().cutoffs > 0, "expected some pruning");
}

#[test]
fn negamax_reuses_table_entries() {
    let mut game = ChessGame::new();
    let mut engine = Engine::new(0);
    engine
        .negamax(&mut game, 2, Score::NEG_INFINITY, Score::INFINITY, 1)
        .unwrap();
    assert!(engine.table().get(&game.key(), 2).is_some());

    let nodes_before = engine.stats().nodes;
    engine
        .negamax(&mut game, 2, Score::NEG_INFINITY, Score::INFINITY, 1)
        .unwrap();
    assert_eq!(engine.stats().nodes, nodes_before + 1);
    assert!(engine.stats().table_hits >= 1);
}

// ============================================================================
// Root selection tests
// ============================================================================

#[test]
fn finds_mate_in_one_back_rank() {
    let mut game = ChessGame::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").unwrap();
    let mut engine = Engine::new(1);
    assert_eq!(uci_of(&mut engine, &mut game, 1).as_deref(), Some("e1e8"));
}

#[test]
fn search_reports_white_relative_mate_score() {
    let mut game = ChessGame::from_fen("4q2k/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let mut engine = Engine::new(1);
    let outcome = engine.search(&mut game, 1).unwrap();
    assert_eq!(outcome.score, Some(-MATE_SCORE));
    assert_eq!(
        outcome.best_move.map(|mv| game.uci(&mv)).as_deref(),
        Some("e8e1")
    );
}

#[test]
fn returns_none_for_stalemate() {
    let mut game = ChessGame::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1").unwrap();
    let mut engine = Engine::new(1);
    assert!(engine.best_move(&mut game, 3).unwrap().is_none());
}

#[test]
fn returns_none_for_checkmated_position() {
    let mut game =
        ChessGame::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
    let mut engine = Engine::new(1);
    let outcome = engine.search(&mut game, 3).unwrap();
    assert!(outcome.best_move.is_none());
    assert!(outcome.score.is_none());
}

#[test]
fn captures_free_queen() {
    let mut game = ChessGame::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
    let mut engine = Engine::new(1);
    assert_eq!(uci_of(&mut engine, &mut game, 2).as_deref(), Some("d1d5"));
}

#[test]
fn avoids_hanging_queen() {
    // Qxc6 wins a knight but loses the queen to a pawn recapture.
    let mut game =
        ChessGame::from_fen("r1bqkbnr/pppppppp/2n5/8/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3")
            .unwrap();
    let mut engine = Engine::new(1);
    let uci = uci_of(&mut engine, &mut game, 3).expect("should find a move");
    assert_ne!(uci, "f3c6");
}

#[test]
fn start_position_depth_three_plays_sound_move() {
    let mut game = ChessGame::new();
    let legal = game.legal_moves();
    let mut engine = Engine::new(2024);
    let outcome = engine.search(&mut game, DEFAULT_DEPTH).unwrap();

    let mv = outcome.best_move.expect("start position has moves");
    assert!(legal.contains(&mv));
    let score = outcome.score.expect("searched move has a score");
    assert!(score > -1.0, "opening move loses material: {score}");
    assert_eq!(game.ply(), 0);
    assert!(outcome.stats.nodes > 0);
}

#[test]
fn every_mate_scores_the_same() {
    // Qa8 mates at once, but deeper searches also see slower mates.
    let mut game = ChessGame::from_fen("7k/8/6K1/8/8/8/Q7/8 w - - 0 1").unwrap();
    assert_eq!(uci_of(&mut Engine::new(0), &mut game, 1).as_deref(), Some("a2a8"));

    for seed in 0..8 {
        let mut engine = Engine::new(seed);
        let outcome = engine.search(&mut game, DEFAULT_DEPTH).unwrap();
        assert_eq!(outcome.score, Some(MATE_SCORE));
        assert!(game.legal_moves().contains(&outcome.best_move.unwrap()));
    }
}

#[test]
fn depth_zero_is_searched_as_one() {
    let mut game = ChessGame::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").unwrap();
    let mut engine = Engine::new(1);
    assert_eq!(uci_of(&mut engine, &mut game, 0).as_deref(), Some("e1e8"));
}

#[test]
fn tie_break_varies_with_seed() {
    let mut game = ChessGame::new();
    let mut picks = HashSet::new();
    for seed in 0..30 {
        let mut engine = Engine::with_parts(
            TranspositionTable::<PositionKey>::new(),
            ConstantEvaluator(0.0),
            seed,
        );
        let mv = engine.best_move(&mut game, 1).unwrap().unwrap();
        picks.insert(game.uci(&mv));
    }
    assert!(picks.len() > 1, "every seed picked {picks:?}");
}

#[test]
fn tie_break_is_reproducible_per_seed() {
    let mut game = ChessGame::new();
    let mut pick = |seed| {
        let mut engine = Engine::with_parts(
            TranspositionTable::<PositionKey>::new(),
            ConstantEvaluator(0.0),
            seed,
        );
        engine.best_move(&mut game, 2).unwrap()
    };
    assert_eq!(pick(17), pick(17));
}

// ============================================================================
// Table lifecycle
// ============================================================================

#[test]
fn clearing_table_does_not_change_result() {
    let mut game = super::random_game(21, 6);
    let mut engine = Engine::new(8);

    let cold = engine.search(&mut game, 3).unwrap();
    assert!(!engine.table().is_empty());

    engine.reseed(8);
    let warm = engine.search(&mut game, 3).unwrap();

    engine.clear_table();
    assert!(engine.table().is_empty());
    assert_eq!(engine.stats().nodes, 0);
    engine.reseed(8);
    let cleared = engine.search(&mut game, 3).unwrap();

    assert_eq!(cold.best_move, warm.best_move);
    assert_eq!(cold.score, warm.score);
    assert_eq!(cold.best_move, cleared.best_move);
    assert_eq!(cold.score, cleared.score);
    assert!(warm.stats.nodes < cold.stats.nodes);
}

#[test]
fn shared_table_serves_engines_on_other_threads() {
    let game = super::random_game(5, 6);
    let table = SharedTranspositionTable::<PositionKey>::new();

    let expected = {
        let mut local = game.clone();
        Engine::new(0).search(&mut local, 2).unwrap().score
    };

    let workers: Vec<_> = (0..2u64)
        .map(|seed| {
            let table = table.clone();
            let mut local = game.clone();
            std::thread::spawn(move || {
                let mut engine = Engine::with_parts(table, MaterialEvaluator, seed);
                engine.search(&mut local, 2).unwrap().score
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), expected);
    }
    assert!(!table.is_empty());
}

// ============================================================================
// Recovery and failure paths
// ============================================================================

#[test]
fn evaluation_failure_propagates_and_restores_position() {
    let mut game = super::random_game(9, 6);
    let key = game.key();
    let ply = game.ply();

    let mut engine = Engine::with_parts(
        TranspositionTable::<PositionKey>::new(),
        FailingEvaluator::after(25),
        0,
    );
    let result = engine.best_move(&mut game, 3);

    assert!(matches!(result, Err(SearchError::Evaluation { .. })));
    assert_eq!(game.key(), key);
    assert_eq!(game.ply(), ply);
}

#[test]
fn empty_move_list_outside_game_over_is_scored_as_leaf() {
    // Queen against rook, Black to move; mobility is zero without moves.
    let mut stuck = Stuck(ChessGame::from_fen("3rk3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap());
    let static_eval = MaterialEvaluator.evaluate(&stuck).unwrap();
    assert_eq!(static_eval, 4.0);

    let mut engine = Engine::new(0);
    let score = engine
        .negamax(&mut stuck, 3, Score::NEG_INFINITY, Score::INFINITY, -1)
        .unwrap();
    assert_eq!(score, -static_eval);
    assert_eq!(engine.stats().nodes, 1);

    let entry = engine.table().probe(&stuck.key(), 0).expect("leaf is stored");
    assert_eq!(entry.depth, 0);
    assert_eq!(entry.score, -static_eval);
    assert_eq!(entry.bound_type, BoundType::Exact);

    // The root has nothing to choose from either.
    assert!(engine.best_move(&mut stuck, 2).unwrap().is_none());
}

#[test]
fn unscorable_moves_fall_back_to_random_legal_move() {
    let mut game = ChessGame::new();
    let legal = game.legal_moves();
    let mut engine = Engine::with_parts(
        TranspositionTable::<PositionKey>::new(),
        ConstantEvaluator(Score::NAN),
        3,
    );
    let outcome = engine.search(&mut game, 1).unwrap();
    let mv = outcome.best_move.expect("fallback picks a move");
    assert!(legal.contains(&mv));
    assert!(outcome.score.is_none());
}

// ============================================================================
// Levels
// ============================================================================

#[test]
fn levels_pick_legal_moves() {
    let mut game = super::random_game(13, 10);
    let legal = game.legal_moves();
    let mut engine = Engine::new(4);

    let easy = engine.choose_move(&mut game, Level::Easy).unwrap();
    let medium = engine
        .choose_move(&mut game, Level::Medium { depth: 2 })
        .unwrap();
    assert!(legal.contains(&easy.unwrap()));
    assert!(legal.contains(&medium.unwrap()));
}

#[test]
fn medium_level_finds_mate() {
    let mut game = ChessGame::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").unwrap();
    let mut engine = Engine::new(4);
    let mv = engine
        .choose_move(&mut game, Level::Medium { depth: 1 })
        .unwrap()
        .unwrap();
    assert_eq!(game.uci(&mv), "e1e8");
}
