//! Aggregate statistics over the whole dictionary.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Aggregate frequency statistics, computed once when segments are built.
///
/// Serialized as a plain JSON document with camelCase field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusMetadata {
    pub word_count: u64,
    pub total_frequency: u64,
    pub min_frequency: u64,
    pub max_frequency: u64,
    pub mean_frequency: f64,
    pub median_frequency: f64,
    pub stddev_frequency: f64,
    pub total_article_count: u64,
    pub hyphenates_count: u64,
}

impl CorpusMetadata {
    /// Compute metadata from per-word `(frequency, article_count, hyphenated_form_count)` triples.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u64, u64, u64)>,
    {
        let mut frequencies = Vec::new();
        let mut total_article_count = 0u64;
        let mut hyphenates_count = 0u64;

        for (frequency, articles, hyphenates) in entries {
            frequencies.push(frequency);
            total_article_count += articles;
            hyphenates_count += hyphenates;
        }

        if frequencies.is_empty() {
            return CorpusMetadata::default();
        }

        frequencies.sort_unstable();
        let word_count = frequencies.len() as u64;
        let total_frequency: u64 = frequencies.iter().sum();
        let mean = total_frequency as f64 / word_count as f64;

        let mid = frequencies.len() / 2;
        let median = if frequencies.len() % 2 == 0 {
            (frequencies[mid - 1] as f64 + frequencies[mid] as f64) / 2.0
        } else {
            frequencies[mid] as f64
        };

        let variance = frequencies
            .iter()
            .map(|&f| {
                let delta = f as f64 - mean;
                delta * delta
            })
            .sum::<f64>()
            / word_count as f64;

        CorpusMetadata {
            word_count,
            total_frequency,
            min_frequency: frequencies[0],
            max_frequency: frequencies[frequencies.len() - 1],
            mean_frequency: mean,
            median_frequency: median,
            stddev_frequency: variance.sqrt(),
            total_article_count,
            hyphenates_count,
        }
    }

    /// Average frequency per word, 0 for an empty corpus.
    pub fn average_frequency(&self) -> f64 {
        if self.word_count == 0 {
            return 0.0;
        }
        self.total_frequency as f64 / self.word_count as f64
    }

    /// Parse metadata from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load metadata from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Save metadata to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
