//! Phonotactic model of English-like words.
//!
//! Two bigram-style tables are learned from a word list: character
//! transitions within a syllable (two-character context to next character)
//! and syllable-to-syllable transitions within a word. The character table
//! scores how word-like a string is; the syllable table drives generation of
//! pseudo-words restricted to a letter pool.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use lexicomb::config::PhonotacticConfig;
//! use lexicomb::phonotactic::{GenerationOptions, PhonotacticModel, VowelGroupSyllabifier};
//!
//! let words = ["grand", "dragoon", "agron", "wagon", "iron", "apron"];
//! let model = PhonotacticModel::train(words, Arc::new(VowelGroupSyllabifier), PhonotacticConfig::default())?;
//!
//! let options = GenerationOptions::new("dragon", 'g', 4, 8)?;
//! let generated: Vec<String> = model.generate_viable_words(&options).collect();
//! assert_eq!(generated.len(), model.count_viable_words(&options));
//! assert!(generated.iter().all(|w| w.contains('g')));
//! # Ok::<(), lexicomb::error::LexicombError>(())
//! ```

pub mod document;
pub mod generate;
pub mod graph;
pub mod model;
pub mod random;
pub mod syllabifier;
pub mod table;
pub mod trainer;

pub use document::ModelDocument;
pub use generate::{GenerationOptions, ViableWords};
pub use graph::SyllableGraph;
pub use model::{ModelSummary, PhonotacticModel};
pub use syllabifier::{Syllabifier, VowelGroupSyllabifier};
pub use table::{CharContext, Glyph, SyllableKey, TransitionTable};
pub use trainer::ModelTrainer;
