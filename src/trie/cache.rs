//! Per-trie segment cache with single-flight loading.

use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use parking_lot::Mutex;
use tokio::sync::OnceCell;

use crate::error::Result;
use crate::trie::codec::decode_segment;
use crate::trie::loader::SegmentLoader;
use crate::trie::node::TrieNode;

type Slot = Arc<OnceCell<Option<Arc<TrieNode>>>>;

/// Lazily filled cache of decoded segments, one slot per first letter.
///
/// Concurrent first-use callers of the same letter share a single load. A
/// successful load (including "no such segment") is kept for the lifetime of
/// the cache. A failed load leaves the slot empty so the next caller retries.
pub struct SegmentCache {
    loader: Arc<dyn SegmentLoader>,
    slots: Mutex<AHashMap<char, Slot>>,
}

impl SegmentCache {
    pub fn new(loader: Arc<dyn SegmentLoader>) -> Self {
        SegmentCache {
            loader,
            slots: Mutex::new(AHashMap::new()),
        }
    }

    /// Get the decoded segment for `letter`, loading it on first use.
    pub async fn segment(&self, letter: char) -> Result<Option<Arc<TrieNode>>> {
        let slot = {
            let mut slots = self.slots.lock();
            slots.entry(letter).or_default().clone()
        };

        let segment = slot.get_or_try_init(|| self.load(letter)).await?;
        Ok(segment.clone())
    }

    async fn load(&self, letter: char) -> Result<Option<Arc<TrieNode>>> {
        debug!("loading segment '{letter}'");
        match self.loader.load(letter).await? {
            Some(blob) => {
                let node = decode_segment(letter, &blob)?;
                debug!("segment '{letter}' loaded ({} bytes, {} words)", blob.len(), node.word_count());
                Ok(Some(Arc::new(node)))
            }
            None => {
                debug!("segment '{letter}' is absent");
                Ok(None)
            }
        }
    }

    /// Whether a load for `letter` has completed successfully.
    pub fn is_loaded(&self, letter: char) -> bool {
        self.slots
            .lock()
            .get(&letter)
            .is_some_and(|slot| slot.initialized())
    }

    /// Letters whose segment load has completed, in ascending order.
    pub fn loaded_letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(&letter, _)| letter)
            .collect();
        letters.sort_unstable();
        letters
    }
}

impl std::fmt::Debug for SegmentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentCache")
            .field("loaded", &self.loaded_letters())
            .finish()
    }
}
