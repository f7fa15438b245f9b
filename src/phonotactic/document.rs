//! JSON export and import of a trained model.
//!
//! The document holds exactly two tables, `charTransitions` and
//! `syllableBigrams`, each mapping a context string to successor strings and
//! their log-probabilities. Boundary markers are written as `^`/`$` in the
//! character table and as `^^`/`$$` in the syllable table.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::config::PhonotacticConfig;
use crate::error::{LexicombError, Result};
use crate::phonotactic::model::PhonotacticModel;
use crate::phonotactic::syllabifier::Syllabifier;
use crate::phonotactic::table::{CharContext, Glyph, SyllableKey, TransitionTable};

const START_MARKER: char = '^';
const END_MARKER: char = '$';
const SYLLABLE_START: &str = "^^";
const SYLLABLE_END: &str = "$$";

type DocumentTable = BTreeMap<String, BTreeMap<String, f64>>;

/// Serializable form of a [`PhonotacticModel`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDocument {
    pub char_transitions: DocumentTable,
    pub syllable_bigrams: DocumentTable,
}

fn glyph_to_char(glyph: Glyph) -> char {
    match glyph {
        Glyph::Start => START_MARKER,
        Glyph::End => END_MARKER,
        Glyph::Char(c) => c,
    }
}

fn parse_glyph(c: char) -> Result<Glyph> {
    match c {
        START_MARKER => Ok(Glyph::Start),
        END_MARKER => Ok(Glyph::End),
        c if c.is_alphabetic() => Ok(Glyph::Char(c)),
        c => Err(LexicombError::model(format!("invalid character {c:?} in charTransitions"))),
    }
}

fn parse_context(key: &str) -> Result<CharContext> {
    let mut chars = key.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => Ok((parse_glyph(a)?, parse_glyph(b)?)),
        _ => Err(LexicombError::model(format!(
            "character context {key:?} is not two characters long"
        ))),
    }
}

fn parse_symbol(key: &str) -> Result<Glyph> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => parse_glyph(c),
        _ => Err(LexicombError::model(format!(
            "character symbol {key:?} is not a single character"
        ))),
    }
}

fn syllable_to_string(key: &SyllableKey) -> String {
    match key {
        SyllableKey::Start => SYLLABLE_START.to_string(),
        SyllableKey::End => SYLLABLE_END.to_string(),
        SyllableKey::Syllable(s) => s.clone(),
    }
}

fn parse_syllable(key: &str) -> Result<SyllableKey> {
    match key {
        SYLLABLE_START => Ok(SyllableKey::Start),
        SYLLABLE_END => Ok(SyllableKey::End),
        s if !s.is_empty() && s.chars().all(char::is_alphabetic) => Ok(SyllableKey::Syllable(s.to_string())),
        s => Err(LexicombError::model(format!("invalid syllable {s:?} in syllableBigrams"))),
    }
}

fn check_log_probability(table: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value <= 0.0 {
        Ok(value)
    } else {
        Err(LexicombError::model(format!(
            "{table} holds {value}, which is not a log-probability"
        )))
    }
}

fn export_table<K, S>(
    table: &TransitionTable<K, S>,
    context_key: impl Fn(&K) -> String,
    symbol_key: impl Fn(&S) -> String,
) -> DocumentTable
where
    K: Eq + std::hash::Hash + Clone,
    S: Eq + std::hash::Hash + Clone,
{
    table
        .iter()
        .map(|(context, symbols)| {
            let symbols = symbols
                .iter()
                .map(|(symbol, &log_p)| (symbol_key(symbol), log_p))
                .collect();
            (context_key(context), symbols)
        })
        .collect()
}

fn import_table<K, S>(
    name: &str,
    table: &DocumentTable,
    parse_context: impl Fn(&str) -> Result<K>,
    parse_symbol: impl Fn(&str) -> Result<S>,
) -> Result<TransitionTable<K, S>>
where
    K: Eq + std::hash::Hash + Clone,
    S: Eq + std::hash::Hash + Clone,
{
    let mut entries = AHashMap::with_capacity(table.len());
    for (context, symbols) in table {
        let mut parsed = AHashMap::with_capacity(symbols.len());
        for (symbol, &log_p) in symbols {
            parsed.insert(parse_symbol(symbol)?, check_log_probability(name, log_p)?);
        }
        entries.insert(parse_context(context)?, parsed);
    }
    Ok(TransitionTable::from_entries(entries))
}

impl ModelDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl PhonotacticModel {
    /// Export both transition tables.
    pub fn to_document(&self) -> ModelDocument {
        ModelDocument {
            char_transitions: export_table(
                self.char_transitions(),
                |&(a, b)| [glyph_to_char(a), glyph_to_char(b)].iter().collect(),
                |&glyph| glyph_to_char(glyph).to_string(),
            ),
            syllable_bigrams: export_table(self.syllable_bigrams(), syllable_to_string, syllable_to_string),
        }
    }

    /// Rebuild a model from a document. Malformed keys or values are hard errors.
    pub fn from_document(
        document: &ModelDocument,
        syllabifier: Arc<dyn Syllabifier>,
        config: PhonotacticConfig,
    ) -> Result<Self> {
        config.validate()?;
        let char_transitions = import_table("charTransitions", &document.char_transitions, parse_context, parse_symbol)?;
        let syllable_bigrams =
            import_table("syllableBigrams", &document.syllable_bigrams, parse_syllable, parse_syllable)?;
        Ok(PhonotacticModel::from_tables(
            char_transitions,
            syllable_bigrams,
            syllabifier,
            config,
        ))
    }

    pub fn from_json_str(json: &str, syllabifier: Arc<dyn Syllabifier>, config: PhonotacticConfig) -> Result<Self> {
        let document = ModelDocument::from_json_str(json)?;
        Self::from_document(&document, syllabifier, config)
    }

    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
        syllabifier: Arc<dyn Syllabifier>,
        config: PhonotacticConfig,
    ) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content, syllabifier, config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &self.to_document())?;
        Ok(())
    }
}
