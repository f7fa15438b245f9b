//! Segment loader capability and the built-in loaders.

use std::io;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use async_trait::async_trait;
use log::debug;

use crate::error::Result;

/// Source of compressed trie segments, keyed by first letter.
///
/// Returning `Ok(None)` means the lexicon has no words starting with `letter`.
/// Errors are surfaced unchanged to the trie operation that triggered the load;
/// the trie never retries on its own.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use lexicomb::error::Result;
/// use lexicomb::trie::SegmentLoader;
///
/// struct EmptyLoader;
///
/// #[async_trait]
/// impl SegmentLoader for EmptyLoader {
///     async fn load(&self, _letter: char) -> Result<Option<Vec<u8>>> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait SegmentLoader: Send + Sync {
    /// Fetch the raw blob for `letter`.
    async fn load(&self, letter: char) -> Result<Option<Vec<u8>>>;
}

/// Segments held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySegmentLoader {
    blobs: AHashMap<char, Vec<u8>>,
}

impl MemorySegmentLoader {
    pub fn new() -> Self {
        MemorySegmentLoader::default()
    }

    pub fn insert(&mut self, letter: char, blob: Vec<u8>) {
        self.blobs.insert(letter, blob);
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl FromIterator<(char, Vec<u8>)> for MemorySegmentLoader {
    fn from_iter<I: IntoIterator<Item = (char, Vec<u8>)>>(iter: I) -> Self {
        MemorySegmentLoader {
            blobs: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl SegmentLoader for MemorySegmentLoader {
    async fn load(&self, letter: char) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(&letter).cloned())
    }
}

/// Segments stored as `<root>/<letter>.<extension>` files.
#[derive(Debug, Clone)]
pub struct DirectorySegmentLoader {
    root: PathBuf,
    extension: String,
}

impl DirectorySegmentLoader {
    pub fn new<P: AsRef<Path>>(root: P, extension: &str) -> Self {
        DirectorySegmentLoader {
            root: root.as_ref().to_path_buf(),
            extension: extension.to_string(),
        }
    }

    /// Path of the segment file for `letter`.
    pub fn segment_path(&self, letter: char) -> PathBuf {
        self.root.join(format!("{letter}.{}", self.extension))
    }
}

#[async_trait]
impl SegmentLoader for DirectorySegmentLoader {
    async fn load(&self, letter: char) -> Result<Option<Vec<u8>>> {
        let path = self.segment_path(letter);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no segment file at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_loader() {
        let loader: MemorySegmentLoader = vec![('a', vec![1, 2, 3])].into_iter().collect();
        assert_eq!(loader.load('a').await.unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(loader.load('b').await.unwrap(), None);
        assert_eq!(loader.len(), 1);
    }

    #[tokio::test]
    async fn test_directory_loader() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DirectorySegmentLoader::new(dir.path(), "seg");
        std::fs::write(loader.segment_path('q'), b"blob").unwrap();

        assert_eq!(loader.load('q').await.unwrap(), Some(b"blob".to_vec()));
        assert_eq!(loader.load('z').await.unwrap(), None);
    }
}
