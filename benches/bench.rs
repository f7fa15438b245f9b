//! Criterion benchmarks for Lexicomb.
//!
//! Covers puzzle solving over a warm segment cache, cold segment decoding,
//! and exhaustive and random pseudo-word generation.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lexicomb::config::PhonotacticConfig;
use lexicomb::phonotactic::{GenerationOptions, PhonotacticModel, VowelGroupSyllabifier};
use lexicomb::puzzle::PuzzleConstraint;
use lexicomb::trie::{LexiconTrie, TrieBuilder, WordEntry, decode_segment};
use tokio::runtime::Runtime;

const SYLLABLES: &[&str] = &[
    "ta", "ro", "gon", "dra", "ni", "pel", "ca", "mor", "le", "tin", "su", "ber", "an", "ox", "lu", "men",
];

/// Generate pseudo-random syllable words for benchmarking.
fn generate_words(count: usize) -> Vec<String> {
    let mut words = Vec::with_capacity(count);
    for i in 0..count {
        let syllable_count = 1 + (i % 4);
        let mut word = String::new();
        for j in 0..syllable_count {
            let idx = (i * 7 + j * 13 + i / SYLLABLES.len()) % SYLLABLES.len(); // Pseudo-random distribution
            word.push_str(SYLLABLES[idx]);
        }
        words.push(word);
    }
    words
}

fn build_trie(words: &[String]) -> (TrieBuilder, LexiconTrie) {
    let mut builder = TrieBuilder::new();
    for (i, word) in words.iter().enumerate() {
        builder.insert(word, WordEntry::new(1 + (i as u64 * 31) % 1000, 1)).unwrap();
    }
    let loader = builder.to_memory_loader().unwrap();
    let trie = LexiconTrie::new(Arc::new(loader), builder.metadata());
    (builder, trie)
}

/// Benchmark lexicon trie operations.
fn bench_trie(c: &mut Criterion) {
    let mut group = c.benchmark_group("trie");
    let runtime = Runtime::new().unwrap();

    let words = generate_words(20_000);
    let (builder, trie) = build_trie(&words);
    let constraint = PuzzleConstraint::new("tarogdn", 'o', 4).unwrap();

    // Warm every segment so the benchmark measures traversal only
    runtime.block_on(trie.solve(&constraint)).unwrap();

    group.bench_function("solve_warm", |b| {
        b.iter(|| {
            let answers = runtime.block_on(trie.solve(black_box(&constraint))).unwrap();
            black_box(answers)
        })
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("find_batch", |b| {
        b.iter(|| {
            for word in words.iter().take(100) {
                let stats = runtime.block_on(trie.find(black_box(word))).unwrap();
                black_box(stats);
            }
        })
    });

    let blobs = builder.encode_segments().unwrap();
    let (&letter, blob) = blobs.iter().next().unwrap();
    group.throughput(Throughput::Bytes(blob.len() as u64));
    group.bench_function("decode_segment", |b| {
        b.iter(|| {
            let node = decode_segment(letter, black_box(blob)).unwrap();
            black_box(node)
        })
    });

    group.finish();
}

/// Benchmark phonotactic generation.
fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    group.sample_size(20);

    let words = generate_words(5_000);
    let model = PhonotacticModel::train(&words, Arc::new(VowelGroupSyllabifier), PhonotacticConfig::default()).unwrap();
    let options = GenerationOptions::new("tarogdn", 'o', 4, 9).unwrap();

    group.bench_function("count_viable_words", |b| {
        b.iter(|| black_box(model.count_viable_words(black_box(&options))))
    });

    group.bench_function("random_viable_word", |b| {
        b.iter(|| black_box(model.random_viable_word(black_box(&options), 100)))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("score_batch", |b| {
        b.iter(|| {
            for word in words.iter().take(100) {
                black_box(model.score(black_box(word)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_trie, bench_generation);

criterion_main!(benches);
