//! Syllabification capability.

/// Splits a lowercase word into syllables.
///
/// Implementations must return non-empty syllables whose concatenation is the
/// input word. Any `Fn(&str) -> Vec<String>` is a syllabifier, so an external
/// hyphenation routine can be plugged in as a closure.
pub trait Syllabifier: Send + Sync {
    fn syllabify(&self, word: &str) -> Vec<String>;
}

impl<F> Syllabifier for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn syllabify(&self, word: &str) -> Vec<String> {
        self(word)
    }
}

/// Heuristic syllabifier placing one vowel group in each syllable.
///
/// `y` counts as a vowel except at the start of a word. A single consonant
/// between two vowel groups opens the next syllable; with two or more, the
/// first consonant closes the previous syllable. Words without vowels form a
/// single syllable.
#[derive(Debug, Clone, Copy, Default)]
pub struct VowelGroupSyllabifier;

impl VowelGroupSyllabifier {
    fn is_vowel(chars: &[char], i: usize) -> bool {
        match chars[i] {
            'a' | 'e' | 'i' | 'o' | 'u' => true,
            'y' => i > 0,
            _ => false,
        }
    }
}

impl Syllabifier for VowelGroupSyllabifier {
    fn syllabify(&self, word: &str) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let mut groups: Vec<(usize, usize)> = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            if Self::is_vowel(&chars, i) {
                let start = i;
                while i < chars.len() && Self::is_vowel(&chars, i) {
                    i += 1;
                }
                groups.push((start, i));
            } else {
                i += 1;
            }
        }

        if groups.len() < 2 {
            return vec![word.to_string()];
        }

        let mut syllables = Vec::with_capacity(groups.len());
        let mut start = 0;
        for pair in groups.windows(2) {
            let (_, vowel_end) = pair[0];
            let (next_start, _) = pair[1];
            let split = if next_start - vowel_end <= 1 {
                vowel_end
            } else {
                vowel_end + 1
            };
            syllables.push(chars[start..split].iter().collect());
            start = split;
        }
        syllables.push(chars[start..].iter().collect());
        syllables
    }
}
