//! Prefix tree nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Corpus data attached to a terminal node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Occurrence count in the source corpus.
    pub frequency: u64,
    /// Number of distinct source documents containing the word.
    pub article_count: u64,
    /// Alternate hyphenated spellings, in source order.
    pub hyphenated_forms: Vec<String>,
}

impl WordEntry {
    pub fn new(frequency: u64, article_count: u64) -> Self {
        WordEntry {
            frequency,
            article_count,
            hyphenated_forms: Vec::new(),
        }
    }

    pub fn with_hyphenated_forms(mut self, forms: Vec<String>) -> Self {
        self.hyphenated_forms = forms;
        self
    }
}

/// A node of the lexicon trie.
///
/// A node is terminal iff it carries a [`WordEntry`]; non-terminal nodes never
/// hold frequency data. Children are ordered by character so traversals are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    entry: Option<WordEntry>,
}

impl TrieNode {
    pub fn new() -> Self {
        TrieNode::default()
    }

    pub fn is_terminal(&self) -> bool {
        self.entry.is_some()
    }

    pub fn entry(&self) -> Option<&WordEntry> {
        self.entry.as_ref()
    }

    pub fn child(&self, c: char) -> Option<&TrieNode> {
        self.children.get(&c)
    }

    /// Children in ascending character order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (char, &TrieNode)> {
        self.children.iter().map(|(&c, node)| (c, node))
    }

    /// Follow `path` from this node.
    pub fn descend(&self, path: impl IntoIterator<Item = char>) -> Option<&TrieNode> {
        path.into_iter().try_fold(self, |node, c| node.child(c))
    }

    /// Number of terminal nodes in this subtree.
    pub fn word_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_terminal() {
                count += 1;
            }
            stack.extend(node.children.values());
        }
        count
    }

    /// Insert the remaining characters of a word below this node, replacing any
    /// existing entry for the same word.
    pub(crate) fn insert(&mut self, path: impl IntoIterator<Item = char>, entry: WordEntry) {
        let mut node = self;
        for c in path {
            node = node.children.entry(c).or_default();
        }
        node.entry = Some(entry);
    }
}
