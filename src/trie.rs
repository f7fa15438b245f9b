//! Lexicon trie over the dictionary.
//!
//! The dictionary is split into one segment per first letter. Each segment is
//! stored as a compressed blob, fetched through a [`SegmentLoader`] the first
//! time a query touches its letter, and cached by the owning [`LexiconTrie`]
//! for the rest of its lifetime. Segments are immutable and disjoint, so a
//! loaded segment never needs to be invalidated.

pub mod builder;
pub mod cache;
pub mod codec;
pub mod engine;
pub mod loader;
pub mod node;

pub use builder::{METADATA_FILE, TrieBuilder};
pub use cache::SegmentCache;
pub use codec::{decode_segment, encode_segment};
pub use engine::{LexiconTrie, TrieStats, WordStats};
pub use loader::{DirectorySegmentLoader, MemorySegmentLoader, SegmentLoader};
pub use node::{TrieNode, WordEntry};
