//! Exhaustive pseudo-word generation over the syllable graph.

use std::collections::BTreeSet;

use log::debug;

use crate::error::{LexicombError, Result};
use crate::phonotactic::graph::SyllableGraph;
use crate::phonotactic::model::PhonotacticModel;
use crate::phonotactic::table::SyllableKey;
use crate::puzzle::PuzzleConstraint;

/// Letter pool, center letter and length bounds of a generation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    alphabet: BTreeSet<char>,
    center: char,
    min_len: usize,
    max_len: usize,
}

impl GenerationOptions {
    /// Options over `pool ∪ {center}`. Letters are lowercased.
    pub fn new(pool: &str, center: char, min_len: usize, max_len: usize) -> Result<Self> {
        if max_len == 0 {
            return Err(LexicombError::invalid_argument("max length must be positive"));
        }
        if min_len > max_len {
            return Err(LexicombError::invalid_argument(format!(
                "min length {min_len} exceeds max length {max_len}"
            )));
        }
        let center = center.to_lowercase().next().unwrap_or(center);
        let mut alphabet: BTreeSet<char> = pool
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        alphabet.insert(center);

        Ok(GenerationOptions {
            alphabet,
            center,
            min_len,
            max_len,
        })
    }

    /// Options matching a puzzle, with an explicit upper length bound.
    pub fn from_constraint(constraint: &PuzzleConstraint, max_len: usize) -> Result<Self> {
        let pool: String = constraint.alphabet().into_iter().collect();
        Self::new(&pool, constraint.required_letter(), constraint.min_length(), max_len)
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn center(&self) -> char {
        self.center
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

/// Whether appending `next` would make three identical syllables in a row.
pub(crate) fn repeats_third<S: AsRef<str>>(path: &[S], next: &str) -> bool {
    matches!(path, [.., a, b] if a.as_ref() == next && b.as_ref() == next)
}

#[derive(Debug, Clone)]
struct Frame {
    key: SyllableKey,
    length: usize,
    has_center: bool,
    path: Vec<String>,
}

/// Lazy depth-first enumeration of generated words.
///
/// The sequence is finite because every syllable adds at least one character
/// and paths longer than the maximum length are abandoned. Cloning an
/// unconsumed iterator gives an independent restart of the same sequence.
#[derive(Debug, Clone)]
pub struct ViableWords {
    graph: SyllableGraph,
    center: char,
    min_len: usize,
    max_len: usize,
    stack: Vec<Frame>,
}

impl ViableWords {
    fn new(graph: SyllableGraph, options: &GenerationOptions) -> Self {
        ViableWords {
            graph,
            center: options.center,
            min_len: options.min_len,
            max_len: options.max_len,
            stack: vec![Frame {
                key: SyllableKey::Start,
                length: 0,
                has_center: false,
                path: Vec::new(),
            }],
        }
    }
}

impl Iterator for ViableWords {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(frame) = self.stack.pop() {
            if frame.key == SyllableKey::End {
                return Some(frame.path.concat());
            }

            // Pushed in reverse so neighbours are explored in sorted order.
            for next in self.graph.successors(&frame.key).iter().rev() {
                match next {
                    SyllableKey::Start => {}
                    SyllableKey::End => {
                        if frame.length >= self.min_len && frame.has_center {
                            self.stack.push(Frame {
                                key: SyllableKey::End,
                                length: frame.length,
                                has_center: true,
                                path: frame.path.clone(),
                            });
                        }
                    }
                    SyllableKey::Syllable(syllable) => {
                        let length = frame.length + syllable.chars().count();
                        if length > self.max_len || repeats_third(&frame.path, syllable) {
                            continue;
                        }
                        let mut path = frame.path.clone();
                        path.push(syllable.clone());
                        self.stack.push(Frame {
                            key: next.clone(),
                            length,
                            has_center: frame.has_center || syllable.contains(self.center),
                            path,
                        });
                    }
                }
            }
        }
        None
    }
}

impl PhonotacticModel {
    /// Every word reachable from the start to the end marker through pool-only
    /// syllables, containing the center letter and within the length bounds.
    ///
    /// Runs of three or more identical syllables are never produced. A word
    /// reachable through different syllable paths is yielded once per path.
    pub fn generate_viable_words(&self, options: &GenerationOptions) -> ViableWords {
        let graph = SyllableGraph::from_bigrams(self.syllable_bigrams(), options.alphabet());
        debug!(
            "generating over {} syllables and {} edges (center '{}', length {}..={})",
            graph.syllables().len(),
            graph.edge_count(),
            options.center,
            options.min_len,
            options.max_len
        );
        ViableWords::new(graph, options)
    }

    /// Number of words [`generate_viable_words`](Self::generate_viable_words) yields.
    pub fn count_viable_words(&self, options: &GenerationOptions) -> usize {
        self.generate_viable_words(options).count()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::PhonotacticConfig;

    fn split_on_dots(word: &str) -> Vec<String> {
        word.split('.').map(str::to_string).collect()
    }

    /// Model whose syllables are marked with dots in the training data, with
    /// dots stripped before counting.
    fn model(words: &[&str]) -> PhonotacticModel {
        let lookup: Vec<(String, Vec<String>)> = words
            .iter()
            .map(|w| (w.replace('.', ""), split_on_dots(w)))
            .collect();
        let syllabifier = move |word: &str| {
            lookup
                .iter()
                .find(|(plain, _)| plain == word)
                .map(|(_, syllables)| syllables.clone())
                .unwrap_or_else(|| vec![word.to_string()])
        };
        let plain: Vec<String> = words.iter().map(|w| w.replace('.', "")).collect();
        PhonotacticModel::train(plain, Arc::new(syllabifier), PhonotacticConfig::default()).unwrap()
    }

    #[test]
    fn test_options_validation() {
        assert!(GenerationOptions::new("abc", 'a', 5, 4).is_err());
        assert!(GenerationOptions::new("abc", 'a', 0, 0).is_err());

        let options = GenerationOptions::new("AB", 'C', 2, 6).unwrap();
        assert_eq!(options.alphabet().iter().collect::<String>(), "abc");
        assert_eq!(options.center(), 'c');
    }

    #[test]
    fn test_repeats_third() {
        assert!(repeats_third(&["tar", "tar"], "tar"));
        assert!(!repeats_third(&["tar"], "tar"));
        assert!(!repeats_third(&["tar", "ta"], "tar"));
        assert!(!repeats_third::<&str>(&[], "tar"));
    }

    #[test]
    fn test_enumerates_paths() {
        let model = model(&["ta.ro", "ro.ta", "ta.ta"]);
        let options = GenerationOptions::new("taro", 'r', 1, 6).unwrap();
        let mut words: Vec<String> = model.generate_viable_words(&options).collect();
        words.sort();

        // Graph: ^ -> {ta, ro}, ta -> {ro, ta, $}, ro -> {ta, $}.
        assert!(words.contains(&"taro".to_string()));
        assert!(words.contains(&"rota".to_string()));
        assert!(words.contains(&"ro".to_string()));
        assert!(words.contains(&"tataro".to_string()));
        assert!(!words.contains(&"tatata".to_string()));
        assert!(words.iter().all(|w| w.contains('r') && w.len() <= 6));
        assert_eq!(words.len(), model.count_viable_words(&options));
    }

    #[test]
    fn test_self_loop_allows_two_repeats_only() {
        let model = model(&["tar.tar", "tar"]);
        let options = GenerationOptions::new("tar", 't', 1, 20).unwrap();
        let mut words: Vec<String> = model.generate_viable_words(&options).collect();
        words.sort();
        assert_eq!(words, vec!["tar", "tartar"]);
    }

    #[test]
    fn test_deterministic_and_restartable() {
        let model = model(&["ta.ro", "ro.ta", "ta.ta", "ro.ro.ta"]);
        let options = GenerationOptions::new("taro", 'a', 2, 8).unwrap();
        let words = model.generate_viable_words(&options);
        let restart = words.clone();

        let first: Vec<String> = words.collect();
        let second: Vec<String> = restart.collect();
        let third: Vec<String> = model.generate_viable_words(&options).collect();
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_no_results_is_empty() {
        let model = model(&["ta.ro"]);
        let options = GenerationOptions::new("xyz", 'x', 1, 5).unwrap();
        assert_eq!(model.generate_viable_words(&options).next(), None);
        assert_eq!(model.count_viable_words(&options), 0);
    }
}
