//! Collecting transition counts from a training word list.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::PhonotacticConfig;
use crate::error::Result;
use crate::phonotactic::model::PhonotacticModel;
use crate::phonotactic::syllabifier::Syllabifier;
use crate::phonotactic::table::{CharContext, Glyph, SyllableKey, TransitionCounts, glyph_windows};

/// Accumulates character and syllable transition counts.
pub struct ModelTrainer {
    syllabifier: Arc<dyn Syllabifier>,
    char_counts: TransitionCounts<CharContext, Glyph>,
    syllable_counts: TransitionCounts<SyllableKey, SyllableKey>,
    trained: usize,
    skipped: usize,
}

impl ModelTrainer {
    pub fn new(syllabifier: Arc<dyn Syllabifier>) -> Self {
        ModelTrainer {
            syllabifier,
            char_counts: TransitionCounts::new(),
            syllable_counts: TransitionCounts::new(),
            trained: 0,
            skipped: 0,
        }
    }

    /// Count the transitions of one word. Returns false when the word is skipped.
    ///
    /// Only purely alphabetic ASCII words are used. A word whose syllables do
    /// not reconstruct it is skipped as well.
    pub fn add_word(&mut self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            self.skipped += 1;
            return false;
        }

        let syllables: Vec<String> = self
            .syllabifier
            .syllabify(&word)
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if syllables.is_empty() || syllables.concat() != word {
            debug!("syllabifier output {syllables:?} does not reconstruct '{word}'");
            self.skipped += 1;
            return false;
        }

        for syllable in &syllables {
            for (context, next) in glyph_windows(syllable) {
                self.char_counts.add(context, next);
            }
        }

        let mut previous = SyllableKey::Start;
        for syllable in syllables {
            let current = SyllableKey::Syllable(syllable);
            self.syllable_counts.add(previous, current.clone());
            previous = current;
        }
        self.syllable_counts.add(previous, SyllableKey::End);

        self.trained += 1;
        true
    }

    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.add_word(word.as_ref());
        }
    }

    /// Number of words counted so far.
    pub fn trained(&self) -> usize {
        self.trained
    }

    /// Number of words rejected so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Convert the counts into an immutable model.
    pub fn build(self, config: PhonotacticConfig) -> Result<PhonotacticModel> {
        config.validate()?;
        if self.skipped > 0 {
            warn!("skipped {} unusable training words", self.skipped);
        }

        let char_transitions = self.char_counts.into_table(config.prune_floor);
        let syllable_bigrams = self.syllable_counts.into_table(config.prune_floor);
        info!(
            "trained phonotactic model on {} words: {} character contexts, {} syllable contexts",
            self.trained,
            char_transitions.context_count(),
            syllable_bigrams.context_count()
        );

        Ok(PhonotacticModel::from_tables(
            char_transitions,
            syllable_bigrams,
            self.syllabifier,
            config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonotactic::syllabifier::VowelGroupSyllabifier;

    #[test]
    fn test_add_word() {
        let mut trainer = ModelTrainer::new(Arc::new(VowelGroupSyllabifier));
        assert!(trainer.add_word("Wagon"));
        assert!(!trainer.add_word("co-op"));
        assert!(!trainer.add_word(""));
        assert!(!trainer.add_word("naïve"));
        assert_eq!(trainer.trained(), 1);
        assert_eq!(trainer.skipped(), 3);

        let model = trainer.build(PhonotacticConfig::default()).unwrap();
        let bigrams = model.syllable_bigrams();
        assert_eq!(bigrams.get(&SyllableKey::Start, &SyllableKey::Syllable("wa".into())), Some(0.0));
        assert_eq!(
            bigrams.get(&SyllableKey::Syllable("wa".into()), &SyllableKey::Syllable("gon".into())),
            Some(0.0)
        );
        assert_eq!(bigrams.get(&SyllableKey::Syllable("gon".into()), &SyllableKey::End), Some(0.0));
    }

    #[test]
    fn test_rejects_non_reconstructing_syllabifier() {
        let broken = |word: &str| vec![word[1..].to_string()];
        let mut trainer = ModelTrainer::new(Arc::new(broken));
        assert!(!trainer.add_word("abc"));
    }
}
