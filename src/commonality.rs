//! Commonality statistic: maps raw corpus frequencies onto a de-skewed `[0, 1]` scale.
//!
//! Raw frequencies are extremely long-tailed. The statistic takes the logit of
//! a word's probability and rescales it linearly between the logits of the
//! rarest and the most frequent word of the corpus. The logit is monotonic,
//! so commonality is monotonic in frequency.

use crate::corpus::CorpusMetadata;

/// Probabilities are clamped to `[LOGIT_EPSILON, 1 - LOGIT_EPSILON]` before the logit.
pub const LOGIT_EPSILON: f64 = 1e-9;

/// `ln(p / (1 - p))` with `p` clamped away from 0 and 1.
pub fn logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPSILON, 1.0 - LOGIT_EPSILON);
    (p / (1.0 - p)).ln()
}

/// Probability and commonality derived from one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyScore {
    /// `frequency / total_frequency`.
    pub probability: f64,
    /// Logit-normalized frequency in `[0, 1]`.
    pub commonality: f64,
}

/// Probability of `frequency` within the corpus, 0 when the corpus is empty.
pub fn probability(frequency: u64, metadata: &CorpusMetadata) -> f64 {
    if metadata.total_frequency == 0 {
        return 0.0;
    }
    frequency as f64 / metadata.total_frequency as f64
}

/// Commonality of `frequency` relative to the corpus extremes.
pub fn commonality(frequency: u64, metadata: &CorpusMetadata) -> f64 {
    if metadata.total_frequency == 0 {
        return 0.0;
    }

    let p = probability(frequency, metadata);
    let min_p = probability(metadata.min_frequency, metadata);
    let max_p = probability(metadata.max_frequency, metadata);

    let low = logit(min_p);
    let span = logit(max_p) - low;
    if span <= 0.0 {
        // Single-valued corpus: everything at or above the one frequency is maximally common.
        return if p >= max_p { 1.0 } else { 0.0 };
    }

    ((logit(p) - low) / span).clamp(0.0, 1.0)
}

/// Compute both statistics at once.
pub fn score_frequency(frequency: u64, metadata: &CorpusMetadata) -> FrequencyScore {
    FrequencyScore {
        probability: probability(frequency, metadata),
        commonality: commonality(frequency, metadata),
    }
}
