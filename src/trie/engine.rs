//! The lexicon trie engine: lookup, prefix enumeration and puzzle solving.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::commonality::score_frequency;
use crate::config::TrieConfig;
use crate::corpus::CorpusMetadata;
use crate::error::Result;
use crate::puzzle::PuzzleConstraint;
use crate::trie::builder::METADATA_FILE;
use crate::trie::cache::SegmentCache;
use crate::trie::loader::{DirectorySegmentLoader, SegmentLoader};
use crate::trie::node::{TrieNode, WordEntry};

/// Result of looking up a single word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStats {
    pub word: String,
    pub found: bool,
    /// Corpus frequency, or the caller's fallback when the word is absent.
    pub frequency: u64,
    /// Logit-normalized frequency in `[0, 1]`.
    pub commonality: f64,
    /// `frequency / total_frequency`.
    pub probability: f64,
    pub article_count: u64,
    pub hyphenated_forms: Vec<String>,
}

impl WordStats {
    fn from_entry(word: String, entry: &WordEntry, metadata: &CorpusMetadata) -> Self {
        let score = score_frequency(entry.frequency, metadata);
        WordStats {
            word,
            found: true,
            frequency: entry.frequency,
            commonality: score.commonality,
            probability: score.probability,
            article_count: entry.article_count,
            hyphenated_forms: entry.hyphenated_forms.clone(),
        }
    }

    fn missing(word: String, fallback_frequency: u64, metadata: &CorpusMetadata) -> Self {
        let score = score_frequency(fallback_frequency, metadata);
        WordStats {
            word,
            found: false,
            frequency: fallback_frequency,
            commonality: score.commonality,
            probability: score.probability,
            article_count: 0,
            hyphenated_forms: Vec::new(),
        }
    }
}

/// Summary statistics of the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrieStats {
    pub word_count: u64,
    pub total_frequency: u64,
    pub average_frequency: f64,
}

/// A prefix tree over the dictionary whose per-letter segments are loaded on demand.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use lexicomb::puzzle::PuzzleConstraint;
/// use lexicomb::trie::{LexiconTrie, TrieBuilder, WordEntry};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> lexicomb::error::Result<()> {
/// let mut builder = TrieBuilder::new();
/// builder.insert("comb", WordEntry::new(120, 10))?;
/// builder.insert("combo", WordEntry::new(40, 6))?;
///
/// let trie = LexiconTrie::new(Arc::new(builder.to_memory_loader()?), builder.metadata());
/// assert!(trie.find("Comb").await?.found);
///
/// let constraint = PuzzleConstraint::new("bcmo", 'c', 4)?;
/// assert_eq!(trie.solve(&constraint).await?.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LexiconTrie {
    cache: SegmentCache,
    metadata: CorpusMetadata,
    config: TrieConfig,
}

impl LexiconTrie {
    pub fn new(loader: Arc<dyn SegmentLoader>, metadata: CorpusMetadata) -> Self {
        Self::with_config(loader, metadata, TrieConfig::default())
    }

    pub fn with_config(loader: Arc<dyn SegmentLoader>, metadata: CorpusMetadata, config: TrieConfig) -> Self {
        LexiconTrie {
            cache: SegmentCache::new(loader),
            metadata,
            config,
        }
    }

    /// Open a segment directory written by [`TrieBuilder::write_to_directory`](crate::trie::TrieBuilder::write_to_directory).
    pub fn open_directory<P: AsRef<Path>>(dir: P, config: TrieConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let metadata = CorpusMetadata::load_from_file(dir.join(METADATA_FILE))?;
        let loader = DirectorySegmentLoader::new(dir, &config.segment_extension);
        Ok(Self::with_config(Arc::new(loader), metadata, config))
    }

    pub fn metadata(&self) -> &CorpusMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    pub fn cache(&self) -> &SegmentCache {
        &self.cache
    }

    /// Look up a word with a fallback frequency of 0.
    pub async fn find(&self, word: &str) -> Result<WordStats> {
        self.find_with_fallback(word, 0).await
    }

    /// Look up a word. A missing word reports `fallback_frequency` as its frequency.
    pub async fn find_with_fallback(&self, word: &str, fallback_frequency: u64) -> Result<WordStats> {
        let normalized = word.to_lowercase();
        let mut chars = normalized.chars();
        let Some(first) = chars.next() else {
            return Ok(WordStats::missing(normalized, fallback_frequency, &self.metadata));
        };

        let Some(segment) = self.cache.segment(first).await? else {
            return Ok(WordStats::missing(normalized, fallback_frequency, &self.metadata));
        };

        let stats = match segment.descend(chars).and_then(TrieNode::entry) {
            Some(entry) => WordStats::from_entry(normalized, entry, &self.metadata),
            None => WordStats::missing(normalized, fallback_frequency, &self.metadata),
        };
        Ok(stats)
    }

    /// Every word starting with `prefix`, with its frequency.
    ///
    /// The result is exhaustive. Order follows the depth-first traversal and
    /// is not guaranteed to be alphabetical.
    pub async fn words_with_prefix(&self, prefix: &str) -> Result<Vec<(String, u64)>> {
        let normalized = prefix.to_lowercase();
        let mut chars = normalized.chars();
        let Some(first) = chars.next() else {
            return Ok(Vec::new());
        };
        let Some(segment) = self.cache.segment(first).await? else {
            return Ok(Vec::new());
        };
        let Some(start) = segment.descend(chars) else {
            return Ok(Vec::new());
        };

        let mut words = Vec::new();
        let mut stack: Vec<(&TrieNode, String)> = vec![(start, normalized)];
        while let Some((node, word)) = stack.pop() {
            if let Some(entry) = node.entry() {
                words.push((word.clone(), entry.frequency));
            }
            // Reverse so lower characters are popped first.
            for (c, child) in node.children().rev() {
                let mut next = word.clone();
                next.push(c);
                stack.push((child, next));
            }
        }
        Ok(words)
    }

    /// All dictionary words that satisfy the puzzle constraint.
    ///
    /// Only edges whose character is in the pool are followed. A word is
    /// accepted when it is terminal, at least `min_length` characters long and
    /// contains the required letter. The search is exhaustive.
    pub async fn solve(&self, constraint: &PuzzleConstraint) -> Result<Vec<WordStats>> {
        let letters: &BTreeSet<char> = constraint.valid_letters();
        let required = constraint.required_letter();
        let min_length = constraint.min_length();
        let mut answers = Vec::new();

        for &first in letters {
            let Some(segment) = self.cache.segment(first).await? else {
                continue;
            };

            // (node, word so far, length in chars, required letter seen)
            let mut stack: Vec<(&TrieNode, String, usize, bool)> =
                vec![(segment.as_ref(), first.to_string(), 1, first == required)];
            while let Some((node, word, length, has_required)) = stack.pop() {
                if has_required
                    && length >= min_length
                    && let Some(entry) = node.entry()
                {
                    answers.push(WordStats::from_entry(word.clone(), entry, &self.metadata));
                }
                for (c, child) in node.children().rev() {
                    if !letters.contains(&c) {
                        continue;
                    }
                    let mut next = word.clone();
                    next.push(c);
                    stack.push((child, next, length + 1, has_required || c == required));
                }
            }
        }

        debug!(
            "solved pool {:?} (required '{}', min length {}): {} answers",
            letters,
            required,
            min_length,
            answers.len()
        );
        Ok(answers)
    }

    /// Solve with the configured default minimum length.
    pub async fn solve_letters(&self, letters: &str, required: char) -> Result<Vec<WordStats>> {
        let constraint = PuzzleConstraint::new(letters, required, self.config.default_min_length)?;
        self.solve(&constraint).await
    }

    /// Word count, total and average frequency from the corpus metadata.
    pub fn stats(&self) -> TrieStats {
        TrieStats {
            word_count: self.metadata.word_count,
            total_frequency: self.metadata.total_frequency,
            average_frequency: self.metadata.average_frequency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::builder::TrieBuilder;

    fn trie() -> LexiconTrie {
        let mut builder = TrieBuilder::new();
        for (word, frequency) in [("bee", 50), ("been", 30), ("beet", 5), ("bet", 80), ("tee", 9)] {
            builder.insert(word, WordEntry::new(frequency, 1)).unwrap();
        }
        LexiconTrie::new(Arc::new(builder.to_memory_loader().unwrap()), builder.metadata())
    }

    #[tokio::test]
    async fn test_find() {
        let trie = trie();
        let stats = trie.find("BEE").await.unwrap();
        assert!(stats.found);
        assert_eq!(stats.word, "bee");
        assert_eq!(stats.frequency, 50);
        assert!(stats.probability > 0.0 && stats.probability < 1.0);

        assert!(!trie.find("be").await.unwrap().found);
        assert!(!trie.find("zebra").await.unwrap().found);
        assert_eq!(trie.find_with_fallback("beez", 7).await.unwrap().frequency, 7);

        let empty = trie.find("").await.unwrap();
        assert!(!empty.found);
        assert_eq!(empty.frequency, 0);
        assert_eq!(empty.probability, 0.0);
    }

    #[tokio::test]
    async fn test_find_loads_only_first_letter() {
        let trie = trie();
        trie.find("bet").await.unwrap();
        assert_eq!(trie.cache().loaded_letters(), vec!['b']);
    }

    #[tokio::test]
    async fn test_words_with_prefix() {
        let trie = trie();
        let mut words = trie.words_with_prefix("bee").await.unwrap();
        words.sort();
        assert_eq!(
            words,
            vec![("bee".to_string(), 50), ("been".to_string(), 30), ("beet".to_string(), 5)]
        );
        assert!(trie.words_with_prefix("").await.unwrap().is_empty());
        assert!(trie.words_with_prefix("bx").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_solve() {
        let trie = trie();
        let constraint = PuzzleConstraint::new("bet", 't', 3).unwrap();
        let mut words: Vec<String> = trie.solve(&constraint).await.unwrap().into_iter().map(|s| s.word).collect();
        words.sort();
        assert_eq!(words, vec!["beet", "bet", "tee"]);

        let constraint = PuzzleConstraint::new("bet", 't', 4).unwrap();
        let words: Vec<String> = trie.solve(&constraint).await.unwrap().into_iter().map(|s| s.word).collect();
        assert_eq!(words, vec!["beet"]);
    }

    #[tokio::test]
    async fn test_solve_letters_uses_default_min_length() {
        let trie = trie();
        let words: Vec<String> = trie
            .solve_letters("ben", 'n')
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.word)
            .collect();
        assert_eq!(words, vec!["been"]);
    }

    #[test]
    fn test_stats() {
        let stats = trie().stats();
        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.total_frequency, 174);
        assert!((stats.average_frequency - 34.8).abs() < 1e-12);
    }
}
