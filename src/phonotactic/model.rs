//! The trained phonotactic model: scoring, viability and pool filtering.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::PhonotacticConfig;
use crate::error::Result;
use crate::phonotactic::syllabifier::Syllabifier;
use crate::phonotactic::table::{CharContext, Glyph, SyllableKey, TransitionTable, glyph_windows};
use crate::phonotactic::trainer::ModelTrainer;

/// Size summary of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub char_contexts: usize,
    pub char_transitions: usize,
    pub syllable_contexts: usize,
    pub syllable_transitions: usize,
}

/// Character-within-syllable and syllable-bigram transition tables.
///
/// The tables are immutable once built; every stored value is a natural-log
/// probability `<= 0`.
#[derive(Clone)]
pub struct PhonotacticModel {
    char_transitions: TransitionTable<CharContext, Glyph>,
    syllable_bigrams: TransitionTable<SyllableKey, SyllableKey>,
    syllabifier: Arc<dyn Syllabifier>,
    config: PhonotacticConfig,
}

impl PhonotacticModel {
    /// Train a model from a list of real words.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use lexicomb::config::PhonotacticConfig;
    /// use lexicomb::phonotactic::{PhonotacticModel, VowelGroupSyllabifier};
    ///
    /// let words = ["grand", "wagon", "dragoon", "iron", "apron"];
    /// let model = PhonotacticModel::train(words, Arc::new(VowelGroupSyllabifier), PhonotacticConfig::default())?;
    /// assert!(model.score("dragon") > model.score("xqzt"));
    /// # Ok::<(), lexicomb::error::LexicombError>(())
    /// ```
    pub fn train<I, S>(words: I, syllabifier: Arc<dyn Syllabifier>, config: PhonotacticConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trainer = ModelTrainer::new(syllabifier);
        trainer.add_words(words);
        trainer.build(config)
    }

    pub fn from_tables(
        char_transitions: TransitionTable<CharContext, Glyph>,
        syllable_bigrams: TransitionTable<SyllableKey, SyllableKey>,
        syllabifier: Arc<dyn Syllabifier>,
        config: PhonotacticConfig,
    ) -> Self {
        PhonotacticModel {
            char_transitions,
            syllable_bigrams,
            syllabifier,
            config,
        }
    }

    pub fn char_transitions(&self) -> &TransitionTable<CharContext, Glyph> {
        &self.char_transitions
    }

    pub fn syllable_bigrams(&self) -> &TransitionTable<SyllableKey, SyllableKey> {
        &self.syllable_bigrams
    }

    pub fn config(&self) -> &PhonotacticConfig {
        &self.config
    }

    pub fn syllabifier(&self) -> &Arc<dyn Syllabifier> {
        &self.syllabifier
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            char_contexts: self.char_transitions.context_count(),
            char_transitions: self.char_transitions.transition_count(),
            syllable_contexts: self.syllable_bigrams.context_count(),
            syllable_transitions: self.syllable_bigrams.transition_count(),
        }
    }

    /// Lowercased, non-empty syllables of `word`.
    pub fn syllabify(&self, word: &str) -> Vec<String> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Vec::new();
        }
        self.syllabifier
            .syllabify(&word)
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Mean transition log-probability of a single syllable.
    ///
    /// One unseen transition, or one below the hard transition floor, scores
    /// the whole syllable at the fixed unseen score.
    pub fn syllable_score(&self, syllable: &str) -> f64 {
        let windows = glyph_windows(syllable);
        let mut total = 0.0;
        for (context, next) in &windows {
            match self.char_transitions.get(context, next) {
                Some(log_p) if log_p >= self.config.hard_transition_floor => total += log_p,
                _ => return self.config.unseen_syllable_score,
            }
        }
        total / windows.len() as f64
    }

    /// Each syllable of `word` with its score.
    pub fn score_breakdown(&self, word: &str) -> Vec<(String, f64)> {
        self.syllabify(word)
            .into_iter()
            .map(|syllable| {
                let score = self.syllable_score(&syllable);
                (syllable, score)
            })
            .collect()
    }

    /// Mean syllable score of `word`; the empty-word score when it has no syllables.
    pub fn score(&self, word: &str) -> f64 {
        let breakdown = self.score_breakdown(word);
        if breakdown.is_empty() {
            return self.config.empty_word_score;
        }
        breakdown.iter().map(|(_, score)| score).sum::<f64>() / breakdown.len() as f64
    }

    /// True iff `word` has syllables and each scores above the viability threshold.
    pub fn is_viable(&self, word: &str) -> bool {
        let breakdown = self.score_breakdown(word);
        !breakdown.is_empty()
            && breakdown
                .iter()
                .all(|(_, score)| *score > self.config.viability_threshold)
    }

    /// Reduced copy keeping only contexts and symbols spelled with `pool` letters.
    ///
    /// Boundary markers are always kept. Log-probabilities are copied as they
    /// are, not renormalized, so scores of pool-only words are unchanged.
    pub fn filter_model(&self, pool: &str) -> Self {
        let alphabet: BTreeSet<char> = pool.chars().flat_map(char::to_lowercase).collect();
        let allowed = |c: char| alphabet.contains(&c);

        let char_transitions = self.char_transitions.filtered(
            |&(a, b)| a.is_within(&allowed) && b.is_within(&allowed),
            |glyph| glyph.is_within(&allowed),
        );
        let syllable_bigrams = self
            .syllable_bigrams
            .filtered(|key| key.is_within(&allowed), |key| key.is_within(&allowed));

        info!(
            "filtered model to pool {:?}: {} -> {} character contexts, {} -> {} syllable contexts",
            pool,
            self.char_transitions.context_count(),
            char_transitions.context_count(),
            self.syllable_bigrams.context_count(),
            syllable_bigrams.context_count()
        );

        PhonotacticModel {
            char_transitions,
            syllable_bigrams,
            syllabifier: Arc::clone(&self.syllabifier),
            config: self.config.clone(),
        }
    }
}

impl std::fmt::Debug for PhonotacticModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhonotacticModel")
            .field("summary", &self.summary())
            .field("config", &self.config)
            .finish()
    }
}
