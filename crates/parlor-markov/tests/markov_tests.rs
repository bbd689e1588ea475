//! Tests for parlor-markov: observation, generation, and concurrency.

use parlor_markov::Chain;
use std::sync::Arc;

// ===========================================================================
// Observation
// ===========================================================================

#[test]
fn fresh_chain_is_empty() {
    let chain = Chain::new(2);
    assert_eq!(chain.prefix_count(), 0);
    assert_eq!(chain.prefix_len(), 2);
}

#[test]
fn observe_builds_prefixes() {
    let chain = Chain::new(2);
    chain.observe("a b c");
    // Prefixes: ["", ""], ["", "a"], ["a", "b"]
    assert_eq!(chain.prefix_count(), 3);
}

#[test]
fn observe_whitespace_only_is_noop() {
    let chain = Chain::new(2);
    chain.observe("   \t\n  ");
    assert_eq!(chain.prefix_count(), 0);
}

#[test]
fn repeated_observation_accumulates() {
    let chain = Chain::new(2);
    chain.observe("hello there friend");
    let after_first = chain.prefix_count();
    chain.observe("hello there stranger");
    assert!(chain.prefix_count() >= after_first);
}

// ===========================================================================
// Generation
// ===========================================================================

#[test]
fn untrained_chain_generates_nothing() {
    let chain = Chain::new(2);
    assert_eq!(chain.generate(10), "");
}

#[test]
fn single_path_generates_deterministically() {
    let chain = Chain::new(2);
    chain.observe("one two three");
    // Only one continuation exists at every step.
    assert_eq!(chain.generate(10), "one two three");
}

#[test]
fn generation_bounded_by_max_words() {
    let chain = Chain::new(2);
    chain.observe("the quick brown fox jumps over the lazy dog tonight");
    for max in [1, 3, 5] {
        let text = chain.generate(max);
        assert!(text.split_whitespace().count() <= max);
    }
}

#[test]
fn generation_stops_at_dead_end() {
    let chain = Chain::new(2);
    chain.observe("short text");
    let text = chain.generate(100);
    assert_eq!(text, "short text");
}

#[test]
fn generated_words_come_from_corpus() {
    let chain = Chain::new(2);
    let corpus = "alpha beta gamma delta epsilon";
    chain.observe(corpus);
    let words: Vec<&str> = corpus.split_whitespace().collect();
    for word in chain.generate(10).split_whitespace() {
        assert!(words.contains(&word), "unexpected word: {}", word);
    }
}

#[test]
fn zero_max_words_generates_nothing() {
    let chain = Chain::new(2);
    chain.observe("some training text");
    assert_eq!(chain.generate(0), "");
}

// ===========================================================================
// Concurrency
// ===========================================================================

#[test]
fn concurrent_observe_and_generate() {
    let chain = Arc::new(Chain::new(2));
    let mut handles = Vec::new();

    for i in 0..4 {
        let chain = chain.clone();
        handles.push(std::thread::spawn(move || {
            for j in 0..100 {
                chain.observe(&format!("writer {} message {} hello world", i, j));
            }
        }));
    }
    for _ in 0..4 {
        let chain = chain.clone();
        handles.push(std::thread::spawn(move || {
            for _ in 0..100 {
                let text = chain.generate(10);
                assert!(text.split_whitespace().count() <= 10);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("thread panicked");
    }
    assert!(chain.prefix_count() > 0);
}
