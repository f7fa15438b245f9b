//! Command implementations for Lexicomb CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::LexicombConfig;
use crate::error::{LexicombError, Result};
use crate::phonotactic::{GenerationOptions, ModelTrainer, PhonotacticModel, Syllabifier, VowelGroupSyllabifier};
use crate::puzzle::PuzzleConstraint;
use crate::trie::{LexiconTrie, TrieBuilder};

/// Execute a CLI command.
pub async fn execute_command(args: LexicombArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Build(build_args) => build_segments(build_args.clone(), &config, &args),
        Command::Find(find_args) => find_words(find_args.clone(), &config, &args).await,
        Command::Prefix(prefix_args) => list_prefix(prefix_args.clone(), &config, &args).await,
        Command::Solve(solve_args) => solve_puzzle(solve_args.clone(), &config, &args).await,
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &config, &args),
        Command::Train(train_args) => train_model(train_args.clone(), &config, &args),
        Command::Score(score_args) => score_words(score_args.clone(), &config, &args),
        Command::Generate(generate_args) => generate_words(generate_args.clone(), &config, &args),
        Command::Random(random_args) => random_words(random_args.clone(), &config, &args),
        Command::Filter(filter_args) => filter_model(filter_args.clone(), &config, &args),
        Command::Inspect(inspect_args) => inspect_model(inspect_args.clone(), &config, &args),
    }
}

fn load_config(args: &LexicombArgs) -> Result<LexicombConfig> {
    match &args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            LexicombConfig::load_from_file(path)
        }
        None => Ok(LexicombConfig::default()),
    }
}

fn syllabifier() -> Arc<dyn Syllabifier> {
    Arc::new(VowelGroupSyllabifier)
}

fn load_model<P: AsRef<Path>>(path: P, config: &LexicombConfig) -> Result<PhonotacticModel> {
    PhonotacticModel::load_from_file(path, syllabifier(), config.phonotactic.clone())
}

/// Build segments and metadata from a frequency file.
fn build_segments(args: BuildArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let start = Instant::now();
    let builder = TrieBuilder::load_from_frequency_file(&args.frequency_file)?;
    if builder.word_count() == 0 {
        return Err(LexicombError::invalid_argument(format!(
            "no words found in {}",
            args.frequency_file.display()
        )));
    }

    let metadata = builder.write_to_directory(&args.output_dir, &config.trie.segment_extension)?;

    output_result(
        "Segments built successfully",
        &BuildResult {
            output_dir: args.output_dir.to_string_lossy().to_string(),
            segments: builder.letters().count(),
            word_count: metadata.word_count,
            total_frequency: metadata.total_frequency,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Look up each word.
async fn find_words(args: FindArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let trie = LexiconTrie::open_directory(&args.segments_dir, config.trie.clone())?;

    let mut words = Vec::with_capacity(args.words.len());
    for word in &args.words {
        words.push(trie.find_with_fallback(word, args.fallback).await?);
    }

    output_result("Lookup results", &FindResults { words }, cli_args)
}

/// List every word beginning with a prefix.
async fn list_prefix(args: PrefixArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let trie = LexiconTrie::open_directory(&args.segments_dir, config.trie.clone())?;
    let matches = trie.words_with_prefix(&args.prefix).await?;
    let total = matches.len();

    let words = matches
        .into_iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .map(|(word, frequency)| PrefixMatch { word, frequency })
        .collect();

    output_result(
        &format!("Words starting with '{}'", args.prefix),
        &PrefixResults {
            prefix: args.prefix,
            total,
            words,
        },
        cli_args,
    )
}

/// Solve a letter-pool puzzle against the lexicon.
async fn solve_puzzle(args: SolveArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let start = Instant::now();
    let trie = LexiconTrie::open_directory(&args.segments_dir, config.trie.clone())?;
    let min_length = args.min_length.unwrap_or(config.trie.default_min_length);
    let constraint = PuzzleConstraint::new(&args.letters, args.required, min_length)?;

    let answers = trie.solve(&constraint).await?;
    info!(
        "solved with segments {:?} loaded",
        trie.cache().loaded_letters()
    );

    output_result(
        "Puzzle answers",
        &SolveResults {
            letters: constraint.valid_letters().iter().collect(),
            required: constraint.required_letter(),
            min_length,
            total: answers.len(),
            answers,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Show corpus statistics of a segment directory.
fn show_stats(args: StatsArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let trie = LexiconTrie::open_directory(&args.segments_dir, config.trie.clone())?;

    output_result(
        "Lexicon statistics",
        &LexiconStats {
            segments_dir: args.segments_dir.to_string_lossy().to_string(),
            metadata: trie.metadata().clone(),
        },
        cli_args,
    )
}

/// Read training words, taking the first whitespace-separated token of each line.
fn read_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(word) = trimmed.split_whitespace().next() {
            words.push(word.to_lowercase());
        }
    }
    Ok(words)
}

/// Train a model and write its document.
fn train_model(args: TrainArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let start = Instant::now();
    let words = read_word_list(&args.word_list)?;

    let mut trainer = ModelTrainer::new(syllabifier());
    trainer.add_words(&words);
    let trained_words = trainer.trained();
    let skipped_words = trainer.skipped();

    let model = trainer.build(config.phonotactic.clone())?;
    model.save_to_file(&args.output)?;

    output_result(
        "Model trained successfully",
        &TrainResult {
            output: args.output.to_string_lossy().to_string(),
            trained_words,
            skipped_words,
            summary: model.summary(),
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Score each word against a model.
fn score_words(args: ScoreArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let model = load_model(&args.model, config)?;

    let scores = args
        .words
        .iter()
        .map(|word| {
            let word = word.to_lowercase();
            let syllables: Vec<SyllableScore> = model
                .score_breakdown(&word)
                .into_iter()
                .map(|(syllable, score)| SyllableScore { syllable, score })
                .collect();
            WordScore {
                score: model.score(&word),
                viable: model.is_viable(&word),
                word,
                syllables,
            }
        })
        .collect();

    output_result("Word scores", &ScoreResults { scores }, cli_args)
}

fn generation_options(args: &PoolArgs) -> Result<GenerationOptions> {
    GenerationOptions::new(&args.pool, args.center, args.min_len, args.max_len)
}

/// Enumerate generated words for a pool.
fn generate_words(args: GenerateArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let model = load_model(&args.pool.model, config)?;
    let options = generation_options(&args.pool)?;

    output_result(
        "Generated words",
        &generation_results(&model, &options, args.limit, args.count_only),
        cli_args,
    )
}

/// Generated words, truncated to `limit`. `total` always counts the full sequence.
fn generation_results(
    model: &PhonotacticModel,
    options: &GenerationOptions,
    limit: Option<usize>,
    count_only: bool,
) -> GenerationResults {
    let (total, words) = match (count_only, limit) {
        (true, _) => (model.count_viable_words(options), Vec::new()),
        (false, Some(limit)) => {
            let words: Vec<String> = model.generate_viable_words(options).take(limit).collect();
            (model.count_viable_words(options), words)
        }
        (false, None) => {
            let words: Vec<String> = model.generate_viable_words(options).collect();
            (words.len(), words)
        }
    };

    GenerationResults {
        pool: options.alphabet().iter().collect(),
        center: options.center(),
        total,
        words,
    }
}

/// Generate random words for a pool.
fn random_words(args: RandomArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let model = load_model(&args.pool.model, config)?;
    let options = generation_options(&args.pool)?;
    let max_retries = args.max_retries.unwrap_or(config.phonotactic.max_retries);

    let words: Vec<String> = (0..args.count)
        .filter_map(|_| model.random_viable_word(&options, max_retries))
        .collect();
    if words.len() < args.count {
        warn!(
            "generated {} of {} requested words within {max_retries} attempts each",
            words.len(),
            args.count
        );
    }

    output_result(
        "Random words",
        &GenerationResults {
            pool: options.alphabet().iter().collect(),
            center: options.center(),
            total: words.len(),
            words,
        },
        cli_args,
    )
}

/// Restrict a model to a pool and write the reduced document.
fn filter_model(args: FilterArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let model = load_model(&args.model, config)?;
    let filtered = model.filter_model(&args.pool);
    filtered.save_to_file(&args.output)?;

    output_result(
        "Model filtered successfully",
        &FilterResult {
            output: args.output.to_string_lossy().to_string(),
            before: model.summary(),
            after: filtered.summary(),
        },
        cli_args,
    )
}

/// Show the table sizes of a model.
fn inspect_model(args: InspectArgs, config: &LexicombConfig, cli_args: &LexicombArgs) -> Result<()> {
    let model = load_model(&args.model, config)?;
    output_result("Model summary", &model.summary(), cli_args)
}
