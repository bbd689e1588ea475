//! Shared markov-chain language model trained on observed chat traffic.
//!
//! One `Chain` lives for the whole process: every websocket conversation
//! feeds it, and every bot reply draws from it. The table is guarded by a
//! plain mutex so callers can observe and generate concurrently without
//! any coordination of their own.

use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// A sliding window over the last `prefix_len` words seen.
///
/// Freshly created windows are padded with empty strings, so generation
/// can start from the "beginning of text" state.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
struct Prefix(Vec<String>);

impl Prefix {
    fn start(len: usize) -> Self {
        Self(vec![String::new(); len])
    }

    fn shift(&mut self, word: &str) {
        self.0.remove(0);
        self.0.push(word.to_string());
    }
}

/// Markov chain over whitespace-separated words.
pub struct Chain {
    prefix_len: usize,
    table: Mutex<HashMap<Prefix, Vec<String>>>,
}

impl Chain {
    pub fn new(prefix_len: usize) -> Self {
        Self {
            prefix_len,
            table: Mutex::new(HashMap::new()),
        }
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Number of distinct prefixes observed so far.
    pub fn prefix_count(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Feed observed text into the table. Duplicate suffixes are kept, so
    /// uniform choice at generation time weights by observed frequency.
    pub fn observe(&self, text: &str) {
        let mut prefix = Prefix::start(self.prefix_len);
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        for word in text.split_whitespace() {
            table
                .entry(prefix.clone())
                .or_default()
                .push(word.to_string());
            prefix.shift(word);
        }
    }

    /// Generate up to `max_words` words starting from the beginning-of-text
    /// state. Returns an empty string when the chain is untrained or the
    /// walk hits a dead end immediately.
    pub fn generate(&self, max_words: usize) -> String {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let mut rng = rand::thread_rng();
        let mut prefix = Prefix::start(self.prefix_len);
        let mut words = Vec::new();

        for _ in 0..max_words {
            let Some(next) = table.get(&prefix).and_then(|c| c.choose(&mut rng)) else {
                break;
            };
            words.push(next.clone());
            prefix.shift(next);
        }

        words.join(" ")
    }
}
