//! Command line argument parsing for the Lexicomb CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Lexicomb - lexicon search and pseudo-word generation for letter-pool puzzles
#[derive(Parser, Debug, Clone)]
#[command(name = "lexicomb")]
#[command(about = "Lexicon search and pseudo-word generation for letter-pool puzzles")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexicombArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// JSON configuration file
    #[arg(short, long, env = "LEXICOMB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexicombArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build trie segments and corpus metadata from a frequency file
    Build(BuildArgs),

    /// Look up words in the lexicon
    Find(FindArgs),

    /// List every word starting with a prefix
    Prefix(PrefixArgs),

    /// Find every dictionary answer of a letter-pool puzzle
    Solve(SolveArgs),

    /// Show lexicon statistics
    Stats(StatsArgs),

    /// Train a phonotactic model from a word list
    Train(TrainArgs),

    /// Score words against a phonotactic model
    Score(ScoreArgs),

    /// Enumerate generated pseudo-words for a letter pool
    Generate(GenerateArgs),

    /// Generate random pseudo-words for a letter pool
    Random(RandomArgs),

    /// Reduce a model to the letters of a pool
    Filter(FilterArgs),

    /// Show the size of a model
    Inspect(InspectArgs),
}

/// Arguments for building segments
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// File with lines of `word frequency [article_count] [forms]`
    #[arg(value_name = "FREQUENCY_FILE")]
    pub frequency_file: PathBuf,

    /// Directory receiving the segments and metadata.json
    #[arg(value_name = "SEGMENTS_DIR")]
    pub output_dir: PathBuf,
}

/// Arguments for word lookup
#[derive(Parser, Debug, Clone)]
pub struct FindArgs {
    /// Directory holding the segments and metadata.json
    #[arg(value_name = "SEGMENTS_DIR")]
    pub segments_dir: PathBuf,

    /// Words to look up
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Frequency reported for missing words
    #[arg(long, default_value = "0")]
    pub fallback: u64,
}

/// Arguments for prefix enumeration
#[derive(Parser, Debug, Clone)]
pub struct PrefixArgs {
    /// Directory holding the segments and metadata.json
    #[arg(value_name = "SEGMENTS_DIR")]
    pub segments_dir: PathBuf,

    /// Prefix to expand
    #[arg(value_name = "PREFIX")]
    pub prefix: String,

    /// Maximum number of words to print
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for puzzle solving
#[derive(Parser, Debug, Clone)]
pub struct SolveArgs {
    /// Directory holding the segments and metadata.json
    #[arg(value_name = "SEGMENTS_DIR")]
    pub segments_dir: PathBuf,

    /// Allowed letters
    #[arg(value_name = "LETTERS")]
    pub letters: String,

    /// Letter every answer must contain
    #[arg(value_name = "REQUIRED")]
    pub required: char,

    /// Minimum answer length (defaults to the configured value)
    #[arg(short, long)]
    pub min_length: Option<usize>,
}

/// Arguments for lexicon statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Directory holding the segments and metadata.json
    #[arg(value_name = "SEGMENTS_DIR")]
    pub segments_dir: PathBuf,
}

/// Arguments for model training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Word list with one word per line
    #[arg(value_name = "WORD_LIST")]
    pub word_list: PathBuf,

    /// Output model document
    #[arg(value_name = "MODEL")]
    pub output: PathBuf,
}

/// Arguments for word scoring
#[derive(Parser, Debug, Clone)]
pub struct ScoreArgs {
    /// Model document
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Words to score
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Letter pool and length bounds shared by the generation commands
#[derive(Parser, Debug, Clone)]
pub struct PoolArgs {
    /// Model document
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Letter pool
    #[arg(value_name = "POOL")]
    pub pool: String,

    /// Letter every word must contain
    #[arg(value_name = "CENTER")]
    pub center: char,

    /// Minimum word length
    #[arg(long, default_value = "4")]
    pub min_len: usize,

    /// Maximum word length
    #[arg(long, default_value = "12")]
    pub max_len: usize,
}

/// Arguments for exhaustive generation
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub pool: PoolArgs,

    /// Maximum number of words to print
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print only the number of words
    #[arg(long)]
    pub count_only: bool,
}

/// Arguments for random generation
#[derive(Parser, Debug, Clone)]
pub struct RandomArgs {
    #[command(flatten)]
    pub pool: PoolArgs,

    /// Attempts per word (defaults to the configured value)
    #[arg(long)]
    pub max_retries: Option<usize>,

    /// Number of words to generate
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,
}

/// Arguments for model filtering
#[derive(Parser, Debug, Clone)]
pub struct FilterArgs {
    /// Model document
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Letter pool to keep
    #[arg(value_name = "POOL")]
    pub pool: String,

    /// Output model document
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

/// Arguments for model inspection
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Model document
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
