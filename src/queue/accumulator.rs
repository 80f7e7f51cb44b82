//! The shared, deduplicating word set.

use std::sync::Arc;

use ahash::AHashSet;
use parking_lot::RwLock;
use rand::seq::IteratorRandom;

/// Thread-safe set of words, shared by every consumer of a run.
///
/// Membership test and insert happen under one write lock, so concurrent
/// inserts of the same word collapse into a single entry. Cloning yields a
/// handle to the same set.
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    inner: Arc<RwLock<AHashSet<String>>>,
}

impl WordSet {
    /// Create an empty word set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every word, returning how many were new.
    pub fn insert_all<I>(&self, words: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut set = self.inner.write();
        let mut added = 0;
        for word in words {
            if set.insert(word) {
                added += 1;
            }
        }
        added
    }

    /// Insert one word, returning whether it was new.
    pub fn insert(&self, word: impl Into<String>) -> bool {
        self.inner.write().insert(word.into())
    }

    /// Whether `word` has been collected.
    pub fn contains(&self, word: &str) -> bool {
        self.inner.read().contains(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether no word has been collected.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Up to `amount` randomly chosen words.
    pub fn sample(&self, amount: usize) -> Vec<String> {
        let set = self.inner.read();
        set.iter()
            .choose_multiple(&mut rand::rng(), amount)
            .into_iter()
            .cloned()
            .collect()
    }

    /// All words in byte order.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut words: Vec<String> = self.inner.read().iter().cloned().collect();
        words.sort_unstable();
        words
    }
}
