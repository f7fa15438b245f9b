//! Runtime configuration for the lexicon trie and the phonotactic model.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexicombError, Result};

/// Configuration for the lexicon trie engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrieConfig {
    /// Minimum answer length used when a puzzle does not specify one.
    pub default_min_length: usize,
    /// File extension of segment blobs in a segment directory.
    pub segment_extension: String,
}

impl Default for TrieConfig {
    fn default() -> Self {
        TrieConfig {
            default_min_length: 4,
            segment_extension: "seg".to_string(),
        }
    }
}

/// Thresholds of the phonotactic model. All values are natural logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhonotacticConfig {
    /// Transitions whose log-probability falls below this are pruned at training time.
    pub prune_floor: f64,
    /// A single transition below this marks its whole syllable as implausible.
    pub hard_transition_floor: f64,
    /// Score assigned to a syllable with an unseen or implausible transition.
    pub unseen_syllable_score: f64,
    /// Every syllable must score above this for a word to be viable.
    pub viability_threshold: f64,
    /// Score of a word that yields no syllables.
    pub empty_word_score: f64,
    /// Step ceiling for each direction of a random walk.
    pub walk_step_ceiling: usize,
    /// Default number of attempts for random word generation.
    pub max_retries: usize,
}

impl Default for PhonotacticConfig {
    fn default() -> Self {
        PhonotacticConfig {
            prune_floor: -11.0,
            hard_transition_floor: -6.0,
            unseen_syllable_score: -10.0,
            viability_threshold: -4.0,
            empty_word_score: -100.0,
            walk_step_ceiling: 10,
            max_retries: 100,
        }
    }
}

impl PhonotacticConfig {
    /// Check that the thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        let floors = [
            ("prune_floor", self.prune_floor),
            ("hard_transition_floor", self.hard_transition_floor),
            ("unseen_syllable_score", self.unseen_syllable_score),
            ("viability_threshold", self.viability_threshold),
            ("empty_word_score", self.empty_word_score),
        ];
        for (name, value) in floors {
            if !value.is_finite() || value > 0.0 {
                return Err(LexicombError::config(format!(
                    "{name} must be a finite log-probability <= 0, got {value}"
                )));
            }
        }
        if self.unseen_syllable_score >= self.viability_threshold {
            return Err(LexicombError::config(
                "unseen_syllable_score must be below viability_threshold",
            ));
        }
        if self.walk_step_ceiling == 0 {
            return Err(LexicombError::config("walk_step_ceiling must be positive"));
        }
        Ok(())
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicombConfig {
    pub trie: TrieConfig,
    pub phonotactic: PhonotacticConfig,
}

impl LexicombConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: LexicombConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        if self.trie.segment_extension.is_empty() {
            return Err(LexicombError::config("segment_extension must not be empty"));
        }
        self.phonotactic.validate()
    }
}
