//! Building trie segments from aggregated word frequencies.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use crate::corpus::CorpusMetadata;
use crate::error::{LexicombError, Result};
use crate::trie::codec::encode_segment;
use crate::trie::loader::MemorySegmentLoader;
use crate::trie::node::{TrieNode, WordEntry};

/// Accumulates words into per-letter segments.
#[derive(Debug, Clone, Default)]
pub struct TrieBuilder {
    segments: BTreeMap<char, TrieNode>,
}

impl TrieBuilder {
    pub fn new() -> Self {
        TrieBuilder::default()
    }

    /// Insert a word. The word is lowercased; a repeated word replaces the earlier entry.
    pub fn insert(&mut self, word: &str, entry: WordEntry) -> Result<()> {
        let normalized = word.trim().to_lowercase();
        let mut chars = normalized.chars();
        let first = chars
            .next()
            .ok_or_else(|| LexicombError::invalid_argument("cannot insert an empty word"))?;

        self.segments.entry(first).or_default().insert(chars, entry);
        Ok(())
    }

    /// Load a frequency file with lines of `word frequency [article_count] [form,form,...]`.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn load_from_frequency_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut builder = TrieBuilder::new();
        let reader = BufReader::new(File::open(path)?);
        let mut skipped = 0usize;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            let parsed = match parts.as_slice() {
                [word, frequency, rest @ ..] if rest.len() <= 2 => {
                    let frequency = frequency.parse::<u64>().ok();
                    let articles = match rest.first() {
                        Some(value) => value.parse::<u64>().ok(),
                        None => Some(0),
                    };
                    let forms: Vec<String> = rest
                        .get(1)
                        .map(|forms| forms.split(',').filter(|f| !f.is_empty()).map(str::to_string).collect())
                        .unwrap_or_default();
                    frequency
                        .zip(articles)
                        .map(|(f, a)| (*word, WordEntry::new(f, a).with_hyphenated_forms(forms)))
                }
                _ => None,
            };

            match parsed {
                Some((word, entry)) => builder.insert(word, entry)?,
                None => {
                    skipped += 1;
                    debug!("skipping malformed line {}: {}", line_num + 1, trimmed);
                }
            }
        }

        if skipped > 0 {
            warn!("skipped {skipped} malformed lines in frequency file");
        }
        Ok(builder)
    }

    /// Number of distinct words inserted.
    pub fn word_count(&self) -> usize {
        self.segments.values().map(TrieNode::word_count).sum()
    }

    /// First letters that have at least one word.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.segments.keys().copied()
    }

    /// Aggregate statistics over every inserted word.
    pub fn metadata(&self) -> CorpusMetadata {
        let mut entries = Vec::new();
        for segment in self.segments.values() {
            let mut stack = vec![segment];
            while let Some(node) = stack.pop() {
                if let Some(entry) = node.entry() {
                    entries.push((
                        entry.frequency,
                        entry.article_count,
                        entry.hyphenated_forms.len() as u64,
                    ));
                }
                stack.extend(node.children().map(|(_, child)| child));
            }
        }
        CorpusMetadata::from_entries(entries)
    }

    /// Encode every segment into a blob.
    pub fn encode_segments(&self) -> Result<BTreeMap<char, Vec<u8>>> {
        self.segments
            .iter()
            .map(|(&letter, node)| Ok((letter, encode_segment(letter, node)?)))
            .collect()
    }

    /// Build an in-memory loader holding every segment.
    pub fn to_memory_loader(&self) -> Result<MemorySegmentLoader> {
        Ok(self.encode_segments()?.into_iter().collect())
    }

    /// Write `<letter>.<extension>` files plus `metadata.json` into `dir`.
    pub fn write_to_directory<P: AsRef<Path>>(&self, dir: P, extension: &str) -> Result<CorpusMetadata> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for (letter, blob) in self.encode_segments()? {
            fs::write(dir.join(format!("{letter}.{extension}")), blob)?;
        }

        let metadata = self.metadata();
        metadata.save_to_file(dir.join(METADATA_FILE))?;
        info!(
            "wrote {} segments ({} words) to {}",
            self.segments.len(),
            metadata.word_count,
            dir.display()
        );
        Ok(metadata)
    }
}

/// Name of the metadata document written next to the segments.
pub const METADATA_FILE: &str = "metadata.json";

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::trie::codec::decode_segment;

    #[test]
    fn test_insert_normalizes() {
        let mut builder = TrieBuilder::new();
        builder.insert("Apple", WordEntry::new(10, 2)).unwrap();
        builder.insert("APPLE", WordEntry::new(12, 3)).unwrap();
        builder.insert("ant", WordEntry::new(4, 1)).unwrap();

        assert_eq!(builder.word_count(), 2);
        assert_eq!(builder.letters().collect::<String>(), "a");
        assert!(builder.insert("  ", WordEntry::new(1, 1)).is_err());

        let metadata = builder.metadata();
        assert_eq!(metadata.total_frequency, 16);
        assert_eq!(metadata.max_frequency, 12);
    }

    #[test]
    fn test_frequency_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# word freq articles forms").unwrap();
        writeln!(file, "honey 500 40 hon-ey").unwrap();
        writeln!(file, "hone 20").unwrap();
        writeln!(file, "broken line with too many fields here").unwrap();
        writeln!(file, "bad notanumber").unwrap();
        writeln!(file).unwrap();

        let builder = TrieBuilder::load_from_frequency_file(file.path()).unwrap();
        assert_eq!(builder.word_count(), 2);

        let metadata = builder.metadata();
        assert_eq!(metadata.total_frequency, 520);
        assert_eq!(metadata.total_article_count, 40);
        assert_eq!(metadata.hyphenates_count, 1);
    }

    #[test]
    fn test_write_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = TrieBuilder::new();
        builder.insert("bee", WordEntry::new(3, 1)).unwrap();
        builder.insert("comb", WordEntry::new(5, 1)).unwrap();

        let metadata = builder.write_to_directory(dir.path(), "seg").unwrap();
        assert_eq!(metadata.word_count, 2);

        let blob = fs::read(dir.path().join("c.seg")).unwrap();
        let node = decode_segment('c', &blob).unwrap();
        assert!(node.descend("omb".chars()).is_some_and(TrieNode::is_terminal));
        assert_eq!(
            CorpusMetadata::load_from_file(dir.path().join(METADATA_FILE)).unwrap(),
            metadata
        );
    }
}
