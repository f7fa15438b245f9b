//! Letter-pool puzzle constraints.

use std::collections::BTreeSet;

use crate::error::{LexicombError, Result};

/// Constraint of a single puzzle query. All letters are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleConstraint {
    valid_letters: BTreeSet<char>,
    required_letter: char,
    min_length: usize,
}

impl PuzzleConstraint {
    /// Create a constraint from a letter pool, a required letter and a minimum length.
    ///
    /// The pool is taken as given: a required letter missing from the pool makes
    /// the trie constraint unsatisfiable rather than widening the pool.
    pub fn new(valid_letters: &str, required_letter: char, min_length: usize) -> Result<Self> {
        let valid_letters: BTreeSet<char> = valid_letters
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        if valid_letters.is_empty() {
            return Err(LexicombError::invalid_argument("letter pool is empty"));
        }
        if !required_letter.is_alphabetic() {
            return Err(LexicombError::invalid_argument(format!(
                "required letter {required_letter:?} is not alphabetic"
            )));
        }
        let required_letter = required_letter.to_lowercase().next().unwrap_or(required_letter);

        Ok(PuzzleConstraint {
            valid_letters,
            required_letter,
            min_length,
        })
    }

    pub fn valid_letters(&self) -> &BTreeSet<char> {
        &self.valid_letters
    }

    pub fn required_letter(&self) -> char {
        self.required_letter
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Whether `c` (compared lowercase) belongs to the pool.
    pub fn allows(&self, c: char) -> bool {
        c.to_lowercase().all(|lower| self.valid_letters.contains(&lower))
    }

    /// The pool plus the required letter.
    pub fn alphabet(&self) -> BTreeSet<char> {
        let mut alphabet = self.valid_letters.clone();
        alphabet.insert(self.required_letter);
        alphabet
    }
}
