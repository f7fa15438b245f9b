//! Random single-word generation by bidirectional walks from an anchor syllable.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::phonotactic::generate::GenerationOptions;
use crate::phonotactic::graph::SyllableGraph;
use crate::phonotactic::model::PhonotacticModel;
use crate::phonotactic::table::SyllableKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Walk from `seed` until a boundary marker, at most `ceiling` steps.
///
/// Returns the syllables strictly between the seed and the marker, in word
/// order, or `None` on a dead end or when the ceiling is reached.
fn walk<'g, R: Rng + ?Sized>(
    graph: &'g SyllableGraph,
    seed: &str,
    direction: Direction,
    ceiling: usize,
    rng: &mut R,
) -> Option<Vec<&'g str>> {
    let mut current = SyllableKey::Syllable(seed.to_string());
    let mut visited = Vec::new();

    for _ in 0..ceiling {
        let neighbours = match direction {
            Direction::Forward => graph.successors(&current),
            Direction::Backward => graph.predecessors(&current),
        };
        let next = neighbours.choose(rng)?;
        match next.syllable() {
            Some(syllable) => {
                visited.push(syllable);
                current = next.clone();
            }
            None => {
                if direction == Direction::Backward {
                    visited.reverse();
                }
                return Some(visited);
            }
        }
    }
    None
}

fn has_triple_repeat(syllables: &[&str]) -> bool {
    syllables.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

impl PhonotacticModel {
    /// One random viable word, or `None` when the pool has no syllable
    /// containing the center letter or every attempt fails.
    pub fn random_viable_word(&self, options: &GenerationOptions, max_retries: usize) -> Option<String> {
        self.random_viable_word_with_rng(options, max_retries, &mut rand::rng())
    }

    /// [`random_viable_word`](Self::random_viable_word) driven by the given generator.
    ///
    /// Each attempt picks a uniformly random anchor syllable, walks backward to
    /// the start marker and forward to the end marker, and accepts the result
    /// if it fits the length bounds, has no three identical syllables in a row
    /// and is viable.
    pub fn random_viable_word_with_rng<R: Rng + ?Sized>(
        &self,
        options: &GenerationOptions,
        max_retries: usize,
        rng: &mut R,
    ) -> Option<String> {
        let graph = SyllableGraph::from_bigrams(self.syllable_bigrams(), options.alphabet());
        let anchors = graph.anchors(options.center());
        if anchors.is_empty() {
            debug!("no anchor syllable contains '{}'", options.center());
            return None;
        }

        let ceiling = self.config().walk_step_ceiling;
        for _ in 0..max_retries {
            let seed = *anchors.choose(rng)?;
            let Some(prefix) = walk(&graph, seed, Direction::Backward, ceiling, rng) else {
                continue;
            };
            let Some(suffix) = walk(&graph, seed, Direction::Forward, ceiling, rng) else {
                continue;
            };

            let mut syllables = prefix;
            syllables.push(seed);
            syllables.extend(suffix);
            if has_triple_repeat(&syllables) {
                continue;
            }

            let word = syllables.concat();
            let length = word.chars().count();
            if length < options.min_len() || length > options.max_len() || !self.is_viable(&word) {
                continue;
            }
            return Some(word);
        }

        debug!("random walk gave up after {max_retries} attempts");
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::PhonotacticConfig;
    use crate::phonotactic::syllabifier::VowelGroupSyllabifier;

    fn model() -> PhonotacticModel {
        PhonotacticModel::train(
            ["grand", "dragoon", "agron", "wagon", "iron", "apron"],
            Arc::new(VowelGroupSyllabifier),
            PhonotacticConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_has_triple_repeat() {
        assert!(has_triple_repeat(&["ta", "ta", "ta"]));
        assert!(!has_triple_repeat(&["ta", "ta", "ro", "ta"]));
    }

    #[test]
    fn test_random_word_properties() {
        let model = model();
        let options = GenerationOptions::new("dragon", 'g', 4, 8).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let word = model.random_viable_word_with_rng(&options, 100, &mut rng).unwrap();
            assert!(word.contains('g'));
            assert!((4..=8).contains(&word.chars().count()));
            assert!(model.is_viable(&word));
            assert!(word.chars().all(|c| options.alphabet().contains(&c)));
        }
    }

    #[test]
    fn test_no_anchor_returns_none() {
        let model = model();
        let options = GenerationOptions::new("xyz", 'q', 1, 10).unwrap();
        assert_eq!(model.random_viable_word(&options, 50), None);
    }

    #[test]
    fn test_zero_retries_returns_none() {
        let model = model();
        let options = GenerationOptions::new("dragon", 'g', 4, 8).unwrap();
        assert_eq!(model.random_viable_word(&options, 0), None);
    }

    #[test]
    fn test_unreachable_length_returns_none() {
        let model = model();
        let options = GenerationOptions::new("dragon", 'g', 12, 20).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(model.random_viable_word_with_rng(&options, 50, &mut rng), None);
    }
}
