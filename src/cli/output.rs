//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{LexicombArgs, OutputFormat};
use crate::corpus::CorpusMetadata;
use crate::error::Result;
use crate::phonotactic::ModelSummary;
use crate::trie::WordStats;

/// Result structure for segment building.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub output_dir: String,
    pub segments: usize,
    pub word_count: u64,
    pub total_frequency: u64,
    pub duration_ms: u64,
}

/// Result structure for word lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct FindResults {
    pub words: Vec<WordStats>,
}

/// A single prefix match.
#[derive(Debug, Serialize, Deserialize)]
pub struct PrefixMatch {
    pub word: String,
    pub frequency: u64,
}

/// Result structure for prefix enumeration.
#[derive(Debug, Serialize, Deserialize)]
pub struct PrefixResults {
    pub prefix: String,
    pub total: usize,
    pub words: Vec<PrefixMatch>,
}

/// Result structure for puzzle solving.
#[derive(Debug, Serialize, Deserialize)]
pub struct SolveResults {
    pub letters: String,
    pub required: char,
    pub min_length: usize,
    pub total: usize,
    pub answers: Vec<WordStats>,
    pub duration_ms: u64,
}

/// Result structure for lexicon statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct LexiconStats {
    pub segments_dir: String,
    #[serde(flatten)]
    pub metadata: CorpusMetadata,
}

/// Result structure for model training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub output: String,
    pub trained_words: usize,
    pub skipped_words: usize,
    #[serde(flatten)]
    pub summary: ModelSummary,
    pub duration_ms: u64,
}

/// Score of a single word.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub score: f64,
    pub viable: bool,
    pub syllables: Vec<SyllableScore>,
}

/// Score of a single syllable.
#[derive(Debug, Serialize, Deserialize)]
pub struct SyllableScore {
    pub syllable: String,
    pub score: f64,
}

/// Result structure for word scoring.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResults {
    pub scores: Vec<WordScore>,
}

/// Result structure for generation commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResults {
    pub pool: String,
    pub center: char,
    pub total: usize,
    pub words: Vec<String>,
}

/// Result structure for model filtering.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterResult {
    pub output: String,
    pub before: ModelSummary,
    pub after: ModelSummary,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &LexicombArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &LexicombArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    output_generic_human(&value, args)
}

/// Output generic data in human format.
///
/// Top-level fields print as `key: value`; arrays of objects print one row
/// per element after the scalar fields.
fn output_generic_human(value: &serde_json::Value, _args: &LexicombArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            let mut tables = Vec::new();
            for (key, val) in obj {
                match val {
                    serde_json::Value::Array(rows) if rows.iter().any(|r| r.is_object()) => {
                        tables.push((key, rows));
                    }
                    _ => {
                        let formatted_val = format_value(val);
                        println!("{key}: {formatted_val}");
                    }
                }
            }
            for (key, rows) in tables {
                println!();
                println!("{key}:");
                for row in rows {
                    println!("  {}", format_row(row));
                }
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LexicombArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn format_row(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(key, val)| format!("{key}={}", format_value(val)))
            .collect::<Vec<_>>()
            .join("  "),
        _ => format_value(value),
    }
}

fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f:.4}"),
            _ => n.to_string(),
        },
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => format_row(value),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("test")), "test");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(-0.666666)), "-0.6667");
        assert_eq!(format_value(&json!(false)), "false");
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(["grand", "agron"])), "[grand, agron]");
    }

    #[test]
    fn test_format_row() {
        let row = json!({ "syllable": "dra", "score": -1.5 });
        assert_eq!(format_row(&row), "score=-1.5000  syllable=dra");
        assert_eq!(format_row(&json!("plain")), "plain");
    }
}
