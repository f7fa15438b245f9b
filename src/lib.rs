//! # Lexicomb
//!
//! Lexicon search and pseudo-word generation for letter-pool puzzles.
//!
//! ## Features
//!
//! - Prefix trie over a large dictionary, split into per-letter compressed
//!   segments that are loaded on first use
//! - Exact lookup with frequency statistics, prefix enumeration and
//!   exhaustive puzzle solving
//! - Logit-based commonality score for long-tailed frequencies
//! - Phonotactic model trained from a word list for scoring word-likeness
//!   and generating pronounceable pseudo-words from a letter pool

pub mod cli;
pub mod commonality;
pub mod config;
pub mod corpus;
pub mod error;
pub mod phonotactic;
pub mod puzzle;
pub mod trie;

pub mod prelude {
    pub use crate::commonality::{FrequencyScore, score_frequency};
    pub use crate::config::{LexicombConfig, PhonotacticConfig, TrieConfig};
    pub use crate::corpus::CorpusMetadata;
    pub use crate::error::{LexicombError, Result};
    pub use crate::phonotactic::{GenerationOptions, PhonotacticModel, Syllabifier, VowelGroupSyllabifier};
    pub use crate::puzzle::PuzzleConstraint;
    pub use crate::trie::{LexiconTrie, SegmentLoader, TrieBuilder, WordEntry, WordStats};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
