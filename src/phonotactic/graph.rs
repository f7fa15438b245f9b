//! Syllable graph restricted to a letter pool.

use std::collections::BTreeSet;

use ahash::AHashMap;

use crate::phonotactic::table::{SyllableKey, TransitionTable};

/// Forward and reverse adjacency of the syllable bigram graph, keeping only
/// syllables spelled with pool letters. Built once per query.
#[derive(Debug, Clone, Default)]
pub struct SyllableGraph {
    forward: AHashMap<SyllableKey, Vec<SyllableKey>>,
    reverse: AHashMap<SyllableKey, Vec<SyllableKey>>,
}

impl SyllableGraph {
    pub fn from_bigrams(bigrams: &TransitionTable<SyllableKey, SyllableKey>, alphabet: &BTreeSet<char>) -> Self {
        let allowed = |c: char| alphabet.contains(&c);
        let mut forward: AHashMap<SyllableKey, Vec<SyllableKey>> = AHashMap::new();
        let mut reverse: AHashMap<SyllableKey, Vec<SyllableKey>> = AHashMap::new();

        for (from, successors) in bigrams.iter() {
            if !from.is_within(&allowed) {
                continue;
            }
            for to in successors.keys() {
                if !to.is_within(&allowed) {
                    continue;
                }
                forward.entry(from.clone()).or_default().push(to.clone());
                reverse.entry(to.clone()).or_default().push(from.clone());
            }
        }

        // Sorted adjacency keeps traversal order independent of hash order.
        for neighbours in forward.values_mut().chain(reverse.values_mut()) {
            neighbours.sort_unstable();
        }

        SyllableGraph { forward, reverse }
    }

    pub fn successors(&self, key: &SyllableKey) -> &[SyllableKey] {
        self.forward.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn predecessors(&self, key: &SyllableKey) -> &[SyllableKey] {
        self.reverse.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct syllables appearing in the graph, sorted.
    pub fn syllables(&self) -> BTreeSet<&str> {
        self.forward
            .keys()
            .chain(self.reverse.keys())
            .filter_map(SyllableKey::syllable)
            .collect()
    }

    /// Syllables containing `center`, sorted.
    pub fn anchors(&self, center: char) -> Vec<&str> {
        self.syllables()
            .into_iter()
            .filter(|syllable| syllable.contains(center))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.forward.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
