//! Transition tables of the phonotactic model.
//!
//! Boundary markers are dedicated enum variants, so they can never collide
//! with real characters or syllables.

use std::hash::Hash;

use ahash::AHashMap;

/// A symbol of the character model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Glyph {
    Start,
    End,
    Char(char),
}

impl Glyph {
    /// Whether the glyph is a boundary marker or a character of `alphabet`.
    pub fn is_within(self, alphabet: &impl Fn(char) -> bool) -> bool {
        match self {
            Glyph::Start | Glyph::End => true,
            Glyph::Char(c) => alphabet(c),
        }
    }
}

/// Two-glyph rolling context of the character model.
pub type CharContext = (Glyph, Glyph);

/// A node of the syllable model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyllableKey {
    Start,
    End,
    Syllable(String),
}

impl SyllableKey {
    pub fn syllable(&self) -> Option<&str> {
        match self {
            SyllableKey::Syllable(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the key is a boundary marker or a syllable made of `alphabet` characters.
    pub fn is_within(&self, alphabet: &impl Fn(char) -> bool) -> bool {
        match self {
            SyllableKey::Start | SyllableKey::End => true,
            SyllableKey::Syllable(s) => s.chars().all(alphabet),
        }
    }
}

/// Every `(context, next glyph)` window of a syllable padded with two start
/// and two end markers.
pub fn glyph_windows(syllable: &str) -> Vec<(CharContext, Glyph)> {
    let mut glyphs = vec![Glyph::Start, Glyph::Start];
    glyphs.extend(syllable.chars().map(Glyph::Char));
    glyphs.extend([Glyph::End, Glyph::End]);
    glyphs.windows(3).map(|w| ((w[0], w[1]), w[2])).collect()
}

/// Raw transition counts collected during training.
#[derive(Debug, Clone)]
pub struct TransitionCounts<K, S> {
    counts: AHashMap<K, AHashMap<S, u64>>,
}

impl<K: Eq + Hash, S: Eq + Hash> Default for TransitionCounts<K, S> {
    fn default() -> Self {
        TransitionCounts {
            counts: AHashMap::new(),
        }
    }
}

impl<K: Eq + Hash, S: Eq + Hash> TransitionCounts<K, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, context: K, symbol: S) {
        *self.counts.entry(context).or_default().entry(symbol).or_insert(0) += 1;
    }

    /// Normalize every context into natural-log probabilities, dropping
    /// transitions below `floor` and contexts left empty.
    pub fn into_table(self, floor: f64) -> TransitionTable<K, S> {
        let mut entries = AHashMap::with_capacity(self.counts.len());
        for (context, symbols) in self.counts {
            let total: u64 = symbols.values().sum();
            if total == 0 {
                continue;
            }
            let kept: AHashMap<S, f64> = symbols
                .into_iter()
                .map(|(symbol, count)| (symbol, (count as f64 / total as f64).ln()))
                .filter(|&(_, log_p)| log_p >= floor)
                .collect();
            if !kept.is_empty() {
                entries.insert(context, kept);
            }
        }
        TransitionTable { entries }
    }
}

/// Log-probability transitions from a context to its successor symbols.
#[derive(Debug, Clone)]
pub struct TransitionTable<K, S> {
    entries: AHashMap<K, AHashMap<S, f64>>,
}

impl<K: Eq + Hash, S: Eq + Hash> PartialEq for TransitionTable<K, S> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash, S: Eq + Hash> Default for TransitionTable<K, S> {
    fn default() -> Self {
        TransitionTable {
            entries: AHashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, S: Eq + Hash + Clone> TransitionTable<K, S> {
    pub(crate) fn from_entries(entries: AHashMap<K, AHashMap<S, f64>>) -> Self {
        TransitionTable { entries }
    }

    /// Log-probability of `symbol` following `context`.
    pub fn get(&self, context: &K, symbol: &S) -> Option<f64> {
        self.entries.get(context)?.get(symbol).copied()
    }

    pub fn successors(&self, context: &K) -> Option<&AHashMap<S, f64>> {
        self.entries.get(context)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &AHashMap<S, f64>)> {
        self.entries.iter()
    }

    pub fn context_count(&self) -> usize {
        self.entries.len()
    }

    pub fn transition_count(&self) -> usize {
        self.entries.values().map(|symbols| symbols.len()).sum()
    }

    /// Copy of the table keeping only contexts and symbols accepted by the predicates.
    pub fn filtered(&self, keep_context: impl Fn(&K) -> bool, keep_symbol: impl Fn(&S) -> bool) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|&(context, _)| keep_context(context))
            .filter_map(|(context, symbols)| {
                let kept: AHashMap<S, f64> = symbols
                    .iter()
                    .filter(|&(symbol, _)| keep_symbol(symbol))
                    .map(|(symbol, &log_p)| (symbol.clone(), log_p))
                    .collect();
                (!kept.is_empty()).then(|| (context.clone(), kept))
            })
            .collect();
        TransitionTable { entries }
    }
}
