//! Transposition table for caching search results.
//!
//! Maps a position key to the depth it was searched to, the resulting score,
//! and the kind of bound that score is. A stored entry only answers a probe
//! asking for the same depth or shallower. Stores always overwrite.

use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::types::Score;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

impl BoundType {
    /// Classify a fail-soft result against the window it was searched with.
    #[must_use]
    pub fn classify(score: Score, original_alpha: Score, beta: Score) -> Self {
        if score <= original_alpha {
            BoundType::UpperBound
        } else if score >= beta {
            BoundType::LowerBound
        } else {
            BoundType::Exact
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TTEntry {
    pub depth: u32,
    pub score: Score,
    pub bound_type: BoundType,
}

impl TTEntry {
    /// Whether the entry settles a node searched with `(alpha, beta)`.
    #[must_use]
    pub fn cuts_window(&self, alpha: Score, beta: Score) -> bool {
        match self.bound_type {
            BoundType::Exact => true,
            BoundType::LowerBound => self.score >= beta,
            BoundType::UpperBound => self.score <= alpha,
        }
    }
}

/// Storage used by the searcher to memoize positions.
pub trait TableStore {
    type Key;

    /// Entry for `key` if it was searched at least `min_depth` deep.
    fn probe(&self, key: &Self::Key, min_depth: u32) -> Option<TTEntry>;

    /// Cached score for `key` if it was searched at least `min_depth` deep.
    fn get(&self, key: &Self::Key, min_depth: u32) -> Option<Score> {
        self.probe(key, min_depth).map(|entry| entry.score)
    }

    /// Store a result, replacing whatever was there.
    fn put(&mut self, key: Self::Key, depth: u32, score: Score, bound_type: BoundType);

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Transposition table owned by one engine.
#[derive(Clone, Debug)]
pub struct TranspositionTable<K> {
    entries: HashMap<K, TTEntry>,
}

impl<K> Default for TranspositionTable<K> {
    fn default() -> Self {
        TranspositionTable {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> TranspositionTable<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Eq + Hash> TableStore for TranspositionTable<K> {
    type Key = K;

    fn probe(&self, key: &K, min_depth: u32) -> Option<TTEntry> {
        self.entries
            .get(key)
            .filter(|entry| entry.depth >= min_depth)
            .copied()
    }

    fn put(&mut self, key: K, depth: u32, score: Score, bound_type: BoundType) {
        self.entries.insert(
            key,
            TTEntry {
                depth,
                score,
                bound_type,
            },
        );
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle to a table shared between engines, possibly on other threads.
///
/// Clones refer to the same table. Each probe and store holds the lock for
/// the single operation.
#[derive(Debug)]
pub struct SharedTranspositionTable<K> {
    inner: Arc<Mutex<TranspositionTable<K>>>,
}

impl<K> Clone for SharedTranspositionTable<K> {
    fn clone(&self) -> Self {
        SharedTranspositionTable {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> Default for SharedTranspositionTable<K> {
    fn default() -> Self {
        SharedTranspositionTable {
            inner: Arc::new(Mutex::new(TranspositionTable::default())),
        }
    }
}

impl<K: Eq + Hash> SharedTranspositionTable<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Eq + Hash> TableStore for SharedTranspositionTable<K> {
    type Key = K;

    fn probe(&self, key: &K, min_depth: u32) -> Option<TTEntry> {
        self.inner.lock().probe(key, min_depth)
    }

    fn put(&mut self, key: K, depth: u32, score: Score, bound_type: BoundType) {
        self.inner.lock().put(key, depth, score, bound_type);
    }

    fn clear(&mut self) {
        self.inner.lock().clear();
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }
}

/// A table that remembers nothing.
#[derive(Debug)]
pub struct NoTable<K> {
    _key: PhantomData<fn() -> K>,
}

impl<K> Default for NoTable<K> {
    fn default() -> Self {
        NoTable { _key: PhantomData }
    }
}

impl<K> NoTable<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K> TableStore for NoTable<K> {
    type Key = K;

    fn probe(&self, _key: &K, _min_depth: u32) -> Option<TTEntry> {
        None
    }

    fn put(&mut self, _key: K, _depth: u32, _score: Score, _bound_type: BoundType) {}

    fn clear(&mut self) {}

    fn len(&self) -> usize {
        0
    }
}
